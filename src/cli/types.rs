use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid arguments were provided to a command.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading the configuration failed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A catalog lookup failed.
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Output of a command: text to print, or what went wrong.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "path", "video-id").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// The expected type of this argument, shown in help text.
    pub value_type: ArgType,
}

/// Type classification for command arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A general string value.
    String,

    /// A dot-separated configuration path.
    Path,

    /// A catalog video id.
    VideoId,
}

impl ArgType {
    /// Short name shown in help text.
    pub fn label(self) -> &'static str {
        match self {
            ArgType::String => "string",
            ArgType::Path => "path",
            ArgType::VideoId => "video id",
        }
    }
}

/// Complete metadata for a CLI command.
///
/// Single source of truth for a command's name, arguments, examples and
/// category; used for help generation and argument count validation.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "list", "get").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "catalog", "config").
    pub category: String,
}

/// Interface implemented by every CLI command.
///
/// Commands receive their dependencies through their constructors.
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against
    /// [`metadata`](Self::metadata).
    ///
    /// # Errors
    ///
    /// Returns `CliError` for invalid argument values, missing config paths
    /// or unknown catalog entries.
    fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
