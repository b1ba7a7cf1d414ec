//! Formatting helpers for CLI output.

use toml::Value;

/// ANSI escape codes used in CLI output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Blue color
    pub const BLUE: &'static str = "\x1b[34m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats command names
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats category names
pub fn format_category(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::BLUE, text, Colors::RESET)
}

/// Formats the marker for the currently selected catalog entry
pub fn format_highlight(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::YELLOW, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats usage examples
pub fn format_usage(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats a TOML value for CLI output.
///
/// Scalars print as-is (strings quoted); arrays and tables show their size.
///
/// ```
/// use showreel::cli::formatting::format_toml_value;
///
/// assert_eq!(format_toml_value(&toml::Value::Integer(3000)), "3000");
/// assert_eq!(
///     format_toml_value(&toml::Value::String("info".to_string())),
///     "\"info\""
/// );
/// ```
pub fn format_toml_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Array(arr) => format!("[{}]", arr.len()),
        Value::Table(table) => format!("{{{}}}", table.len()),
        Value::Datetime(datetime) => datetime.to_string(),
    }
}
