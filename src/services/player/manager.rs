use std::{sync::Arc, time::Duration};

use futures::{Stream, StreamExt};
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, instrument};

use crate::{
    config::{PlayerConfig, ReadinessFallback},
    services::common::Property,
};

use super::{
    LifecycleState, MediaReference, MountPoint, PlayerEvent, PlayerRuntime, ScriptLoader,
    worker::{Command, LifecycleWorker},
};

/// Timing policy for a lifecycle manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleOptions {
    /// How long a single `create` may run before it is abandoned.
    pub create_timeout: Duration,
    /// How long to wait for the first readiness signal after creation.
    pub readiness_timeout: Duration,
    /// Upper bound on a player teardown before the next mount proceeds.
    pub teardown_timeout: Duration,
    /// Outcome when `readiness_timeout` elapses.
    pub readiness_fallback: ReadinessFallback,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self::from(&PlayerConfig::default())
    }
}

impl From<&PlayerConfig> for LifecycleOptions {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            create_timeout: config.create_timeout(),
            readiness_timeout: config.readiness_timeout(),
            teardown_timeout: config.teardown_timeout(),
            readiness_fallback: config.readiness_fallback,
        }
    }
}

/// Keeps exactly one player alive on a mount point, matching the most
/// recently bound media.
///
/// Owns its mount point; `bind` and `release` never block and never fail.
/// Outcomes arrive as [`PlayerEvent`]s and through [`state`](Self::state).
/// A background worker task performs teardown and creation in order and
/// discards completions that a newer `bind` or a `release` superseded.
///
/// Dropping the manager releases the player once the worker notices.
pub struct PlayerLifecycleManager {
    mount_id: String,
    command_tx: mpsc::UnboundedSender<Command>,
    state: Property<LifecycleState>,
    events_tx: broadcast::Sender<PlayerEvent>,
    worker_handle: Option<JoinHandle<()>>,
}

impl PlayerLifecycleManager {
    /// Spawns the worker for `mount`. Must be called within a tokio runtime.
    pub fn new<R: PlayerRuntime>(
        loader: Arc<ScriptLoader<R>>,
        mount: MountPoint,
        options: LifecycleOptions,
    ) -> Self {
        const EVENTS_BUFFER_SIZE: usize = 64;

        let mount_id = mount.element_id().to_string();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (events_tx, _) = broadcast::channel(EVENTS_BUFFER_SIZE);
        let state = Property::new(LifecycleState::Idle);

        let worker = LifecycleWorker::new(
            loader,
            Arc::new(mount),
            options,
            state.clone(),
            events_tx.clone(),
        );
        let worker_handle = tokio::spawn(worker.run(command_rx));

        Self {
            mount_id,
            command_tx,
            state,
            events_tx,
            worker_handle: Some(worker_handle),
        }
    }

    /// Element id of the mount point this manager drives.
    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    /// Replace whatever is mounted with a player for `media`.
    ///
    /// The old player is torn down first; the new one is created once the
    /// runtime is ready. If another `bind` follows before this one finishes,
    /// only the later media is mounted.
    pub fn bind(&self, media: MediaReference) {
        debug!(mount = %self.mount_id, media_id = media.media_id(), "Bind requested");
        self.send(Command::Bind(media));
    }

    /// Tear down the mounted player, if any. Safe to call repeatedly.
    pub fn release(&self) {
        debug!(mount = %self.mount_id, "Release requested");
        self.send(Command::Release);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state.get()
    }

    /// Stream of lifecycle state changes, starting with the current state.
    pub fn state_monitored(&self) -> impl Stream<Item = LifecycleState> + Send + use<> {
        self.state.watch()
    }

    /// Waits until the lifecycle state satisfies `predicate`.
    pub async fn wait_for_state(
        &self,
        predicate: impl FnMut(&LifecycleState) -> bool,
    ) -> LifecycleState {
        self.state.wait_for(predicate).await
    }

    /// Receiver for events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events_tx.subscribe()
    }

    /// Stream of events emitted after this call. Events missed by a slow
    /// consumer are skipped.
    pub fn events(&self) -> impl Stream<Item = PlayerEvent> + Send + use<> {
        BroadcastStream::new(self.events_tx.subscribe()).filter_map(|event| async move { event.ok() })
    }

    /// Release the player and stop the worker.
    #[instrument(skip(self), fields(mount = %self.mount_id))]
    pub async fn shutdown(mut self) {
        self.send(Command::Shutdown);

        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.await;
        }
    }

    fn send(&self, command: Command) {
        if self.command_tx.send(command).is_err() {
            debug!(mount = %self.mount_id, "Lifecycle worker already stopped");
        }
    }
}

impl std::fmt::Debug for PlayerLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerLifecycleManager")
            .field("mount_id", &self.mount_id)
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}
