use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
};

/// Prints the JSON schema of the configuration file.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        Ok(serde_json::to_string_pretty(&Config::schema())?)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "schema".to_string(),
            description: "Print the configuration JSON schema".to_string(),
            category: "config".to_string(),
            args: vec![],
            examples: vec!["showreel config schema > showreel.schema.json".to_string()],
        }
    }
}
