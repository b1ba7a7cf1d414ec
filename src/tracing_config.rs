use std::{env, path::Path};

use tracing_appender::{non_blocking::NonBlocking, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{ConfigPaths, LogLevel};

const LOG_FORMAT_VAR: &str = "SHOWREEL_LOG_FORMAT";
const DAYS_TO_KEEP: usize = 7;

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_directive()))
}

fn json_requested() -> bool {
    env::var(LOG_FORMAT_VAR).is_ok_and(|format| format == "json")
}

/// Daily rolling writer into `log_dir`, keeping a week of files.
///
/// The returned writer flushes on a background thread for the rest of the
/// process.
fn rolling_writer(log_dir: &Path) -> Result<NonBlocking, Box<dyn std::error::Error>> {
    let file_appender = rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("showreel")
        .filename_suffix("log")
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The writer must outlive the process; dropping the guard stops flushing.
    std::mem::forget(guard);

    Ok(non_blocking)
}

/// Initialize tracing for a host running the player services.
///
/// Logs go to stdout and to a daily rolling file under the showreel log
/// directory. Uses `RUST_LOG` when set, otherwise `default_level`
/// (normally `general.log_level` from the config). Output is JSON when
/// `SHOWREEL_LOG_FORMAT=json`.
///
/// # Errors
/// Returns error if the log directory or appender cannot be created, or a
/// global subscriber is already installed
pub fn init_with_file(default_level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    let non_blocking = rolling_writer(&ConfigPaths::log_dir()?)?;
    let registry = tracing_subscriber::registry().with(env_filter(default_level));

    if json_requested() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize tracing for one-shot CLI commands.
///
/// Only warnings and errors reach stderr so command output stays clean.
/// The log file still records everything at `file_level`.
///
/// # Errors
/// Returns error if the log directory or appender cannot be created, or a
/// global subscriber is already installed
pub fn init_cli_mode(file_level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    let non_blocking = rolling_writer(&ConfigPaths::log_dir()?)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(LevelFilter::WARN),
        )
        .with(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(env_filter(file_level)),
        )
        .try_init()?;

    Ok(())
}
