//! Configuration schema definitions and loading.
//!
//! Defines the complete configuration structure for Showreel: general
//! settings, the embedded player runtime and the video catalog. All
//! configurations are serializable to/from TOML format.

mod catalog;
mod general;
mod loading;
mod path_ops;
mod paths;
mod player;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogConfig, VideoEntry};
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use player::{PlayerConfig, ReadinessFallback};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Result, ShowreelError};

/// Main configuration structure for Showreel.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Embedded player runtime settings.
    #[serde(default)]
    pub player: PlayerConfig,

    /// Videos shown in the showcase.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Loads the main configuration file, creating an empty one if missing.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be resolved or the file
    /// (or one of its imports) is invalid.
    pub fn load() -> Result<Self> {
        let main_config = ConfigPaths::main_config()?;
        Self::load_with_imports(&main_config)
    }

    /// Looks up a value by dot-separated path (e.g. `player.autoplay` or
    /// `catalog.videos.0.title`).
    ///
    /// # Errors
    /// Returns `ShowreelError::ConfigPathNotFound` if the path does not
    /// resolve, or a validation error if the config cannot be serialized.
    pub fn get_by_path(&self, path: &str) -> Result<toml::Value> {
        let value = toml::Value::try_from(self).map_err(|e| ShowreelError::ConfigValidation {
            component: "config serialization".to_string(),
            details: e.to_string(),
        })?;

        path_ops::navigate_path(&value, path)
    }

    /// JSON schema for the whole configuration.
    pub fn schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
