//! Writes the configuration JSON schema and a sample config to disk.
use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use showreel::config::Config;

#[derive(Parser)]
#[command(name = "generate-schema")]
#[command(about = "Generate configuration reference files for Showreel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// JSON schema for editor completion
    Schema {
        #[arg(short, long, default_value = "docs/config/showreel.schema.json")]
        output: PathBuf,
    },
    /// Config file with every default spelled out
    Defaults {
        #[arg(short, long, default_value = "docs/config/config.default.toml")]
        output: PathBuf,
    },
}

fn write(output: &Path, contents: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, contents)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Schema { output } => {
            let schema = serde_json::to_string_pretty(&Config::schema())?;
            write(&output, &schema)?;
        }
        Commands::Defaults { output } => {
            let defaults = toml::to_string_pretty(&Config::default())?;
            write(&output, &defaults)?;
        }
    }

    Ok(())
}
