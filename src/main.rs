//! Showreel CLI - inspect the video catalog and configuration.

use std::{env, error::Error, process};

use showreel::{
    cli::{CliService, formatting::format_error},
    config::Config,
    tracing_config,
};

fn main() -> Result<(), Box<dyn Error>> {
    // Creates the config directory and file on first run.
    let config = Config::load();
    let log_level = config
        .as_ref()
        .map(|config| config.general.log_level)
        .unwrap_or_default();
    tracing_config::init_cli_mode(log_level)?;

    let args: Vec<String> = env::args().collect();
    let cli_service = CliService::new(config?);

    let category = args.get(1).map(String::as_str).unwrap_or("help");
    let command = args.get(2).map(String::as_str).unwrap_or("");
    let command_args = args.get(3..).unwrap_or(&[]);

    match cli_service.execute_command(category, command, command_args) {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {e}", format_error("Error"));
            process::exit(1);
        }
    }
}
