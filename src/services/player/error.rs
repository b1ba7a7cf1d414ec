use std::time::Duration;

/// Errors that can occur while loading the runtime or driving a player.
///
/// `Clone` because one runtime load result is shared by every caller
/// waiting on it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The third-party runtime could not be fetched or initialized
    #[error("Failed to load player runtime: {0}")]
    RuntimeLoad(String),

    /// The runtime rejected the media reference
    #[error("Failed to create player for {media_id}: {reason}")]
    HandleCreation {
        /// Media that was being mounted
        media_id: String,
        /// Reason given by the runtime
        reason: String,
    },

    /// The mounted player reported an error
    #[error("Playback of {media_id} failed: {reason}")]
    Playback {
        /// Media that was playing
        media_id: String,
        /// Reason given by the runtime
        reason: String,
    },

    /// The runtime did not finish creating the player in time
    #[error("Creating player for {media_id} did not finish within {waited:?}")]
    CreationTimeout {
        /// Media that was being mounted
        media_id: String,
        /// How long the manager waited
        waited: Duration,
    },

    /// The player never signalled readiness
    #[error("Player for {media_id} not ready after {waited:?}")]
    ReadinessTimeout {
        /// Media that was being mounted
        media_id: String,
        /// How long the manager waited
        waited: Duration,
    },

    /// Tearing down a player failed
    #[error("Failed to dispose player: {0}")]
    Disposal(String),
}
