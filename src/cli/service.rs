use std::sync::Arc;

use crate::config::Config;

use super::{CliError, CommandRegistry};

/// Entry point for running CLI commands.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a CLI service with all built-in commands registered.
    pub fn new(config: Config) -> Self {
        let mut registry = CommandRegistry::new(Arc::new(config));
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name.
    ///
    /// `help` (or no category at all) prints the generated help text.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist, or
    /// the command's own error.
    pub fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        if matches!(category, "" | "help" | "--help" | "-h") {
            return Ok(self.registry.help_text());
        }

        self.registry.execute(category, command_name, args)
    }

    /// Lists all available commands organized by category.
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }
}
