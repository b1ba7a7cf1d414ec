use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::config::{PlayerConfig, VideoEntry};

/// Identifies what a player should play.
///
/// Immutable once built: selecting another video produces a new reference.
/// Serializes to the provider's player options object
/// (`fileID`, `appID`, `psign`, `autoplay`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReference {
    #[serde(rename = "fileID")]
    media_id: String,

    #[serde(rename = "appID")]
    provider_app_id: String,

    #[serde(rename = "psign", with = "access_token_field", default)]
    access_token: Option<String>,

    #[serde(default)]
    autoplay: bool,
}

impl MediaReference {
    /// Reference to public media with autoplay enabled.
    pub fn new(media_id: impl Into<String>, provider_app_id: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            provider_app_id: provider_app_id.into(),
            access_token: None,
            autoplay: true,
        }
    }

    /// Reference for a catalog video, using the configured provider account
    /// and autoplay setting.
    pub fn for_video(video: &VideoEntry, config: &PlayerConfig) -> Self {
        Self::new(&video.id, &config.provider_app_id)
            .with_access_token(&video.access_token)
            .with_autoplay(config.autoplay)
    }

    /// Same reference with a signed access token. An empty token means
    /// public access.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Same reference with the given autoplay flag.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Provider-assigned media id.
    pub fn media_id(&self) -> &str {
        &self.media_id
    }

    /// Provider account id.
    pub fn provider_app_id(&self) -> &str {
        &self.provider_app_id
    }

    /// Signed token, if the media requires one.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Whether playback starts as soon as the player is ready.
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }
}

/// The provider expects `psign: ""` for unsigned media.
mod access_token_field {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        token: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(token.as_deref().unwrap_or_default())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok((!token.is_empty()).then_some(token))
    }
}

/// The display surface a player attaches to.
///
/// Deliberately not `Clone`: a mount point is moved into exactly one
/// [`PlayerLifecycleManager`](super::PlayerLifecycleManager), so two
/// managers can never drive the same surface.
#[derive(Debug, PartialEq, Eq)]
pub struct MountPoint {
    element_id: Arc<str>,
}

impl MountPoint {
    /// Mount point for the element with the given id.
    pub fn new(element_id: impl Into<Arc<str>>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }

    /// Id of the element the player is created in.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }
}

impl fmt::Display for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.element_id)
    }
}

/// Process-wide state of the third-party player runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeReadiness {
    /// No player has asked for the runtime yet.
    #[default]
    NotRequested,

    /// The runtime script is being fetched.
    Loading,

    /// The runtime is installed and players can be created.
    Ready,

    /// The last fetch failed; the next request retries it.
    Failed,
}

/// Lifecycle of the player bound to one mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// No player is mounted and none is requested.
    #[default]
    Idle,

    /// Waiting for the runtime before creating the player.
    AwaitingRuntime,

    /// Player creation is in flight or awaiting its first readiness signal.
    Mounting,

    /// Player is mounted and ready.
    Ready,

    /// The last bind failed; a new bind retries.
    Error,
}

impl LifecycleState {
    /// Whether the host should show a loading indicator.
    pub fn is_loading(self) -> bool {
        matches!(self, Self::AwaitingRuntime | Self::Mounting)
    }

    /// Whether the host should show a retry affordance.
    pub fn shows_retry(self) -> bool {
        self == Self::Error
    }
}

/// Playback state reported by a mounted player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Playback reached the end or was stopped
    Stopped,
}

impl From<&str> for PlaybackState {
    fn from(event: &str) -> Self {
        match event {
            "play" | "playing" => Self::Playing,
            "pause" => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

/// Events emitted by a lifecycle manager to its host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The player for `media_id` is ready; hide the loading indicator.
    Ready {
        /// Media that became ready
        media_id: String,
        /// True when readiness was assumed after the readiness timeout
        forced: bool,
    },

    /// Loading or playing `media_id` failed; show a retry affordance.
    Error {
        /// Media that failed
        media_id: String,
        /// Human-readable failure reason
        reason: String,
    },

    /// Playback state of the mounted player changed.
    PlaybackStateChanged {
        /// Media whose playback changed
        media_id: String,
        /// New playback state
        state: PlaybackState,
    },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn serializes_provider_option_names() {
        let media = MediaReference::new("1397757906801587829", "1310364790");

        let json = serde_json::to_value(&media).unwrap();

        assert_eq!(json["fileID"], "1397757906801587829");
        assert_eq!(json["appID"], "1310364790");
        assert_eq!(json["psign"], "");
        assert_eq!(json["autoplay"], true);
    }

    #[test]
    fn empty_psign_means_public_access() {
        let media: MediaReference =
            serde_json::from_str(r#"{"fileID":"v1","appID":"a","psign":"","autoplay":false}"#)
                .unwrap();

        assert_eq!(media.access_token(), None);
        assert!(!media.autoplay());

        let signed = media.with_access_token("token");
        assert_eq!(signed.access_token(), Some("token"));
        assert_eq!(signed.clone().with_access_token("").access_token(), None);
    }

    #[test]
    fn loading_and_retry_affordances() {
        assert!(LifecycleState::AwaitingRuntime.is_loading());
        assert!(LifecycleState::Mounting.is_loading());
        assert!(!LifecycleState::Ready.is_loading());
        assert!(LifecycleState::Error.shows_retry());
        assert!(!LifecycleState::Idle.shows_retry());
    }

    #[test]
    fn playback_state_from_runtime_event_names() {
        assert_eq!(PlaybackState::from("playing"), PlaybackState::Playing);
        assert_eq!(PlaybackState::from("pause"), PlaybackState::Paused);
        assert_eq!(PlaybackState::from("ended"), PlaybackState::Stopped);
    }
}
