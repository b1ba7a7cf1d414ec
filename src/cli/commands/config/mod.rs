//! Configuration inspection commands.
mod get;
mod schema;

use std::sync::Arc;

pub use get::GetCommand;
pub use schema::SchemaCommand;

use crate::{cli::CommandRegistry, config::Config};

/// Registers the `config` category.
pub fn register_commands(registry: &mut CommandRegistry, config: Arc<Config>) {
    const CATEGORY_NAME: &str = "config";

    registry.register_command(CATEGORY_NAME, Box::new(GetCommand::new(config)));
    registry.register_command(CATEGORY_NAME, Box::new(SchemaCommand));
}
