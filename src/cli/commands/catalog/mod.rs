//! Catalog inspection commands.
mod list;
mod media;

use std::sync::Arc;

pub use list::ListCommand;
pub use media::MediaCommand;

use crate::{cli::CommandRegistry, config::Config};

/// Registers the `catalog` category.
pub fn register_commands(registry: &mut CommandRegistry, config: Arc<Config>) {
    const CATEGORY_NAME: &str = "catalog";

    registry.register_command(CATEGORY_NAME, Box::new(ListCommand::new(Arc::clone(&config))));
    registry.register_command(CATEGORY_NAME, Box::new(MediaCommand::new(config)));
}
