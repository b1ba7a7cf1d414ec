use std::{
    env,
    io::{Error, ErrorKind},
    path::PathBuf,
};

const APP_DIR: &str = "showreel";

/// Locates configuration and data directories.
///
/// Follows the XDG Base Directory specification for configuration and keeps
/// logs under `$HOME/.showreel`.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application
    ///
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "showreel" to the base config directory
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` environment variables are set
    pub fn config_dir() -> Result<PathBuf, Error> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| {
                Error::new(
                    ErrorKind::NotFound,
                    "Neither XDG_CONFIG_HOME nor HOME environment variable found",
                )
            })?;

        Ok(PathBuf::from(config_home).join(APP_DIR))
    }

    /// Returns the application data directory, creating it if needed.
    ///
    /// # Errors
    /// Returns an error if HOME is not set or the directory cannot be created
    pub fn app_data_dir() -> Result<PathBuf, Error> {
        let home = env::var("HOME")
            .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not found"))?;

        let app_dir = PathBuf::from(home).join(format!(".{APP_DIR}"));
        if !app_dir.exists() {
            std::fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir)
    }

    /// Returns the log directory, creating it if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created
    pub fn log_dir() -> Result<PathBuf, Error> {
        let log_dir = Self::app_data_dir()?.join("logs");

        if !log_dir.exists() {
            std::fs::create_dir_all(&log_dir)?;
        }

        Ok(log_dir)
    }

    /// Returns the path to the main configuration file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    pub fn main_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
