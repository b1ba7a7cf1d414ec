use std::sync::Arc;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_toml_value,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
};

/// Prints a configuration value by dotted path.
///
/// ```bash
/// showreel config get player.readiness_timeout_ms
/// showreel config get catalog.videos.0.title
/// ```
pub struct GetCommand {
    config: Arc<Config>,
}

impl GetCommand {
    /// Creates a GetCommand reading from `config`.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Command for GetCommand {
    fn execute(&self, args: &[String]) -> CommandResult {
        let path = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <path> argument for 'get' command".to_string())
        })?;

        let value = self
            .config
            .get_by_path(path)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        Ok(format!("{path}: {}", format_toml_value(&value)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get".to_string(),
            description: "Get configuration value".to_string(),
            category: "config".to_string(),
            args: vec![CommandArg {
                name: "path".to_string(),
                description: "Configuration path (e.g., player.autoplay)".to_string(),
                required: true,
                value_type: ArgType::Path,
            }],
            examples: vec![
                "showreel config get player.readiness_timeout_ms".to_string(),
                "showreel config get catalog.videos.0.title".to_string(),
            ],
        }
    }
}
