//! Command-line interface for inspecting the catalog and configuration.
//!
//! Commands are grouped by category (`catalog`, `config`) and registered in
//! a [`CommandRegistry`]; help text is generated from their metadata.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{ArgType, CliError, Command, CommandArg, CommandMetadata, CommandResult};
