use std::{fs, path::Path};

use tracing::info;

use crate::{Result, ShowreelError};

/// Creates an empty configuration file, and its directory, at `path`.
pub(super) fn create_default_config_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ShowreelError::IoError {
            path: parent.to_path_buf(),
            details: format!("Failed to create config directory: {e}"),
        })?;
    }

    info!("Creating default config file at {}", path.display());
    fs::write(path, "# Showreel configuration file\n").map_err(|e| ShowreelError::IoError {
        path: path.to_path_buf(),
        details: format!("Failed to create config file: {e}"),
    })
}
