/// Catalog inspection commands
pub mod catalog;
/// Configuration commands
pub mod config;
