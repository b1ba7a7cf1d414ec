//! Showreel - embedded video player lifecycle for a portfolio showcase.
//!
//! The crate keeps one third-party video player per mount point alive and
//! in sync with what the page wants to show:
//!
//! - [`ScriptLoader`](services::player::ScriptLoader) loads the vendor
//!   runtime once per process
//! - [`PlayerLifecycleManager`](services::player::PlayerLifecycleManager)
//!   tears down and recreates players as the selection changes
//! - [`Showcase`](services::showcase::Showcase) maps catalog selection and
//!   category filters onto the player
//!
//! The vendor runtime itself sits behind the
//! [`PlayerRuntime`](services::player::PlayerRuntime) trait.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use showreel::config::Config;
//!
//! let config = Config::load()?;
//! println!("{} videos in catalog", config.catalog.videos.len());
//! # Ok::<(), showreel::ShowreelError>(())
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface for catalog and configuration inspection.
pub mod cli;

/// Player and showcase services.
pub mod services;

/// Service container.
pub mod service_manager;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{Result, ShowreelError};
