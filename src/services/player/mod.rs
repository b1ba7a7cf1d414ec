//! Embedded video player lifecycle.
//!
//! A [`ScriptLoader`] fetches the third-party runtime once per process. Each
//! mount point gets one [`PlayerLifecycleManager`], which keeps a single
//! player alive for the most recently bound [`MediaReference`] and reports
//! readiness, errors and playback changes as [`PlayerEvent`]s.

/// Player error types
pub mod error;
/// Runtime script loading
pub mod loader;
/// Per-mount-point lifecycle management
pub mod manager;
/// Third-party runtime abstraction
pub mod runtime;
/// Media, mount point and state types
pub mod types;

mod worker;

pub use error::PlayerError;
pub use loader::ScriptLoader;
pub use manager::{LifecycleOptions, PlayerLifecycleManager};
pub use runtime::{PlayerRuntime, RuntimeSignal, SignalSink};
pub use types::{
    LifecycleState, MediaReference, MountPoint, PlaybackState, PlayerEvent, RuntimeReadiness,
};
