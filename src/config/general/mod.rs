mod log_level;

pub use log_level::LogLevel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct GeneralConfig {
    /// Logging level used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_level: LogLevel,
}
