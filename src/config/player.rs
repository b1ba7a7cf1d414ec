use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What the lifecycle manager does when the runtime never signals readiness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessFallback {
    /// Assume the player is ready and hide the loading indicator.
    #[default]
    Ready,

    /// Treat the missing signal as a failure and show the retry affordance.
    Error,
}

/// Embedded player runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Location of the third-party player runtime script.
    pub runtime_url: String,

    /// Provider account identifier sent with every media reference.
    pub provider_app_id: String,

    /// Whether mounted players start playing immediately.
    pub autoplay: bool,

    /// Element id of the surface the player attaches to.
    pub mount_element_id: String,

    /// Upper bound on a single player creation. A creation still running after
    /// this is abandoned and its handle disposed whenever it arrives.
    pub create_timeout_ms: u64,

    /// How long to wait for the first readiness signal after a player is created.
    pub readiness_timeout_ms: u64,

    /// Upper bound on waiting for a player teardown before mounting the next one.
    pub teardown_timeout_ms: u64,

    /// Outcome applied when `readiness_timeout_ms` elapses.
    pub readiness_fallback: ReadinessFallback,
}

impl PlayerConfig {
    /// Creation bound as a `Duration`.
    pub fn create_timeout(&self) -> Duration {
        Duration::from_millis(self.create_timeout_ms)
    }

    /// Readiness wait as a `Duration`.
    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_millis(self.readiness_timeout_ms)
    }

    /// Teardown wait as a `Duration`.
    pub fn teardown_timeout(&self) -> Duration {
        Duration::from_millis(self.teardown_timeout_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            runtime_url:
                "https://web.sdk.qcloud.com/player/tcplayer/release/v4.9.0/tcplayer.min.js"
                    .to_string(),
            provider_app_id: "1310364790".to_string(),
            autoplay: true,
            mount_element_id: "player-container-id".to_string(),
            create_timeout_ms: 10_000,
            readiness_timeout_ms: 3000,
            teardown_timeout_ms: 1000,
            readiness_fallback: ReadinessFallback::Ready,
        }
    }
}
