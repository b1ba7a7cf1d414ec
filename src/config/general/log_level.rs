use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Verbosity of log output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Failures only: runtime load errors, rejected media.
    Error,

    /// Also teardown timeouts and forced readiness.
    Warn,

    /// Player mounts and releases (default level).
    #[default]
    Info,

    /// Every lifecycle transition, including discarded stale completions.
    Debug,

    /// Everything, including raw runtime signals.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}
