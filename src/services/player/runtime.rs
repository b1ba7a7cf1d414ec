use std::{fmt, sync::Arc};

use async_trait::async_trait;

use super::{MediaReference, MountPoint, PlaybackState, PlayerError};

/// Signals a mounted player reports back to its lifecycle manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeSignal {
    /// Metadata is loaded and the first frame can be shown.
    Ready,

    /// Playback started, paused or stopped.
    Playback(PlaybackState),

    /// The player failed after it was created.
    Error(String),
}

/// Channel a runtime uses to report signals for one player.
///
/// Each sink is tied to the bind that created it; signals sent after that
/// bind was superseded or released are dropped by the manager.
#[derive(Clone)]
pub struct SignalSink {
    emit: Arc<dyn Fn(RuntimeSignal) + Send + Sync>,
}

impl SignalSink {
    pub(super) fn new(emit: impl Fn(RuntimeSignal) + Send + Sync + 'static) -> Self {
        Self {
            emit: Arc::new(emit),
        }
    }

    /// Reports a signal. Never blocks; a no-op once the manager is gone.
    pub fn emit(&self, signal: RuntimeSignal) {
        (self.emit)(signal);
    }
}

impl fmt::Debug for SignalSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalSink").finish_non_exhaustive()
    }
}

/// The third-party player runtime.
///
/// Implementations wrap the vendor library: fetching its script once,
/// creating player instances inside a mount point and disposing them.
/// [`Services`](crate::service_manager::Services) builds the runtime from
/// [`PlayerConfig`](crate::config::PlayerConfig), whose `runtime_url` names
/// the script to fetch.
#[async_trait]
pub trait PlayerRuntime: Send + Sync + 'static {
    /// Ownership token for one live player instance.
    type Handle: Send + 'static;

    /// Whether the vendor global is already present, e.g. injected by the
    /// page before any player asked for it.
    fn is_installed(&self) -> bool;

    /// Fetches the runtime script and installs the vendor global.
    ///
    /// # Errors
    /// Returns `PlayerError::RuntimeLoad` if the fetch or initialization fails
    async fn load(&self) -> Result<(), PlayerError>;

    /// Creates a player for `media` inside `mount`.
    ///
    /// The runtime keeps `signals` for the lifetime of the handle and
    /// reports readiness, playback changes and errors through it.
    ///
    /// # Errors
    /// Returns `PlayerError::HandleCreation` if the provider rejects the media
    async fn create(
        &self,
        mount: &MountPoint,
        media: &MediaReference,
        signals: SignalSink,
    ) -> Result<Self::Handle, PlayerError>;

    /// Destroys a player and detaches its listeners.
    ///
    /// # Errors
    /// Returns `PlayerError::Disposal` if the runtime fails to tear it down
    async fn dispose(&self, handle: Self::Handle) -> Result<(), PlayerError>;
}
