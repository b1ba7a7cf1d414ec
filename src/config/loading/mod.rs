mod circular_detection;
mod file_creation;
mod merging;

use std::{
    fs,
    path::{Path, PathBuf},
};

use toml::Value;
use tracing::{debug, instrument};

use super::Config;
use crate::{Result, ShowreelError};
use circular_detection::ImportChain;
use file_creation::create_default_config_file;
use merging::merge_toml_configs;

impl Config {
    /// Loads a configuration file, resolving `imports = ["@name"]` entries.
    ///
    /// Imported files are resolved relative to the importing file (a missing
    /// extension means `.toml`) and merged in order; the importing file's own
    /// values win on conflict. A missing main file is created empty.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read or created
    /// - The TOML content is invalid
    /// - Any imported file cannot be loaded
    /// - The merged configuration does not match the schema
    /// - Imports form a cycle
    #[instrument]
    pub fn load_with_imports(path: &Path) -> Result<Config> {
        if !path.exists() {
            create_default_config_file(path)?;
        }

        let canonical_path = path.canonicalize().map_err(|e| ShowreelError::IoError {
            path: path.to_path_buf(),
            details: format!("Failed to resolve path: {e}"),
        })?;

        let mut chain = ImportChain::default();
        let merged = Self::load_file_tracked(&canonical_path, &mut chain)?;

        merged
            .try_into()
            .map_err(|e| ShowreelError::ConfigValidation {
                component: "config parsing".to_string(),
                details: format!("Configuration validation failed: {e}"),
            })
    }

    fn load_file_tracked(path: &Path, chain: &mut ImportChain) -> Result<Value> {
        chain.enter(path)?;
        let result = Self::load_file(path, chain);
        chain.leave();
        result
    }

    fn load_file(path: &Path, chain: &mut ImportChain) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| ShowreelError::import(e, path))?;
        let value: Value =
            toml::from_str(&content).map_err(|e| ShowreelError::toml_parse(e, Some(path)))?;

        let imports = Self::extract_import_paths(&value)
            .iter()
            .map(|import| {
                let resolved = Self::resolve_import_path(path, import)?;
                let canonical = resolved
                    .canonicalize()
                    .map_err(|e| ShowreelError::import(e, &resolved))?;
                debug!(import = %canonical.display(), "Loading config import");
                Self::load_file_tracked(&canonical, chain)
            })
            .collect::<Result<Vec<Value>>>()?;

        Ok(merge_toml_configs(imports, Self::strip_imports(value)))
    }

    fn extract_import_paths(value: &Value) -> Vec<String> {
        value
            .get("imports")
            .and_then(Value::as_array)
            .map(|imports| {
                imports
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(|s| s.strip_prefix('@'))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn strip_imports(mut value: Value) -> Value {
        if let Value::Table(table) = &mut value {
            table.remove("imports");
        }
        value
    }

    fn resolve_import_path(base_path: &Path, import_path: &str) -> Result<PathBuf> {
        let parent_dir = base_path
            .parent()
            .ok_or_else(|| ShowreelError::ImportError {
                path: base_path.to_path_buf(),
                details: "Invalid base path - no parent directory".to_string(),
            })?;

        let mut import_path_buf = PathBuf::from(import_path);
        if import_path_buf.extension().is_none() {
            import_path_buf.set_extension("toml");
        }

        Ok(parent_dir.join(import_path_buf))
    }
}
