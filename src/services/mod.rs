/// Shared reactive primitives
pub mod common;
/// Embedded video player lifecycle
pub mod player;
/// Video showcase navigation
pub mod showcase;

pub use player::{
    LifecycleState, MediaReference, MountPoint, PlayerError, PlayerEvent, PlayerLifecycleManager,
    PlayerRuntime, ScriptLoader,
};
pub use showcase::{CategoryFilter, Showcase, ShowcaseError};
