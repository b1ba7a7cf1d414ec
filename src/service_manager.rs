use std::sync::Arc;

use tracing::info;

use crate::config::{Config, PlayerConfig};
use crate::services::player::{
    LifecycleOptions, MountPoint, PlayerLifecycleManager, PlayerRuntime, ScriptLoader,
};
use crate::services::showcase::Showcase;
use crate::tracing_config;

/// Container for application services
///
/// Created once at startup. The script loader inside is the single
/// process-wide loader every player shares.
pub struct Services<R: PlayerRuntime> {
    /// Runtime loader shared by all players
    pub loader: Arc<ScriptLoader<R>>,
    config: Config,
}

impl<R: PlayerRuntime> Services<R> {
    /// Startup path for a host process.
    ///
    /// Loads the config file, starts console and file logging at
    /// `general.log_level` and builds the services.
    ///
    /// # Arguments
    /// * `make_runtime` - Builds the vendor runtime from the player settings,
    ///   including the script location in `runtime_url`
    ///
    /// # Errors
    /// Returns error if the config cannot be loaded or logging cannot start
    pub fn start(
        make_runtime: impl FnOnce(&PlayerConfig) -> R,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        tracing_config::init_with_file(config.general.log_level)?;
        info!(
            videos = config.catalog.videos.len(),
            runtime_url = %config.player.runtime_url,
            "Starting showreel services"
        );

        Ok(Self::new(config, make_runtime))
    }

    /// Create services from an already loaded `config`.
    ///
    /// `make_runtime` receives the player settings so the runtime knows where
    /// to fetch its script from.
    pub fn new(config: Config, make_runtime: impl FnOnce(&PlayerConfig) -> R) -> Self {
        let runtime = make_runtime(&config.player);

        Self {
            loader: Arc::new(ScriptLoader::new(Arc::new(runtime))),
            config,
        }
    }

    /// Configuration the services were created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// New lifecycle manager for `mount`, using the configured timings.
    ///
    /// Must be called within a tokio runtime.
    pub fn player(&self, mount: MountPoint) -> PlayerLifecycleManager {
        PlayerLifecycleManager::new(
            Arc::clone(&self.loader),
            mount,
            LifecycleOptions::from(&self.config.player),
        )
    }

    /// Opens the video showcase on the configured mount point.
    ///
    /// Must be called within a tokio runtime.
    pub fn showcase(&self) -> Showcase {
        let mount = MountPoint::new(self.config.player.mount_element_id.as_str());
        Showcase::new(
            self.config.catalog.clone(),
            &self.config.player,
            self.player(mount),
        )
    }
}
