use toml::Value;

use crate::{Result, ShowreelError};

/// Walks a TOML value along a dot-separated path.
///
/// Table keys and array indices may be mixed, e.g. `catalog.videos.0.id`.
///
/// # Errors
/// Returns `ShowreelError::ConfigPathNotFound` if any segment does not resolve
pub(super) fn navigate_path(value: &Value, path: &str) -> Result<Value> {
    let not_found = || ShowreelError::ConfigPathNotFound {
        path: path.to_string(),
    };

    if path.is_empty() {
        return Err(not_found());
    }

    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Table(table) => table.get(part).ok_or_else(not_found)?,
            Value::Array(array) => {
                let index = part.parse::<usize>().map_err(|_| not_found())?;
                array.get(index).ok_or_else(not_found)?
            }
            _ => return Err(not_found()),
        };
    }

    Ok(current.clone())
}
