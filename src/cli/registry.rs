use std::{collections::BTreeMap, sync::Arc};

use crate::config::Config;

use super::{
    CliError, Command,
    commands::{catalog, config},
    formatting::{format_category, format_command, format_description, format_header, format_usage},
    types::CommandMetadata,
};

/// Registry for CLI commands organized by category.
///
/// ```text
/// registry
/// ├── catalog
/// │   ├── list
/// │   └── media
/// └── config
///     ├── get
///     └── schema
/// ```
pub struct CommandRegistry {
    /// category name -> (command name -> command implementation)
    categories: BTreeMap<String, BTreeMap<String, Box<dyn Command>>>,
    config: Arc<Config>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            categories: BTreeMap::new(),
            config,
        }
    }

    /// Registers a command in the specified category, replacing any
    /// command with the same name.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or command does
    /// not exist, `CliError::InvalidArguments` if the argument count does
    /// not match the command's metadata, or whatever the command returns.
    pub fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let found_command = found_category.get(command_name).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find command '{command_name}'"))
        })?;

        Self::validate_args(&found_command.metadata(), args)?;

        found_command.execute(args)
    }

    /// Lists all registered commands by category, both sorted by name.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        self.categories
            .iter()
            .map(|(category, commands)| (category.clone(), commands.keys().cloned().collect()))
            .collect()
    }

    /// Help text for every registered command.
    pub fn help_text(&self) -> String {
        let mut output = format!("{}\n\n", format_header("Showreel commands"));

        for (category, commands) in &self.categories {
            output.push_str(&format!("{}\n", format_category(category)));

            for command in commands.values() {
                let metadata = command.metadata();
                let args: Vec<String> = metadata
                    .args
                    .iter()
                    .map(|arg| {
                        if arg.required {
                            format!("<{}>", arg.name)
                        } else {
                            format!("[{}]", arg.name)
                        }
                    })
                    .collect();

                output.push_str(&format!(
                    "  {} {}  {}\n",
                    format_command(&metadata.name),
                    args.join(" "),
                    format_description(&metadata.description)
                ));

                for example in &metadata.examples {
                    output.push_str(&format!("      {}\n", format_usage(example)));
                }
            }

            output.push('\n');
        }

        output
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let total_count = metadata.args.len();

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at least {} arguments, got {}",
                required_count,
                args.len(),
            )));
        }

        if args.len() > total_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at most {} arguments, got {}",
                total_count,
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers every built-in command.
    pub fn register_all_commands(&mut self) {
        let config = Arc::clone(&self.config);
        catalog::register_commands(self, Arc::clone(&config));
        config::register_commands(self, config);
    }
}
