//! Unit tests for the CLI registry and commands.
//! Commands run against in-memory configs only.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use toml::Value;

use crate::cli::{CliError, CliService, CommandRegistry, formatting::format_toml_value};
use crate::config::{Config, VideoEntry};

fn video(id: &str, category: &str, access_token: &str) -> VideoEntry {
    VideoEntry {
        id: id.to_string(),
        title: format!("Title {id}"),
        description: String::new(),
        thumbnail: String::new(),
        access_token: access_token.to_string(),
        category: category.to_string(),
    }
}

fn sample_config() -> Config {
    let mut config = Config::default();
    config.catalog.categories = vec!["packaging".to_string(), "editing".to_string()];
    config.catalog.videos = vec![
        video("1397757906801587829", "packaging", ""),
        video("cut-1", "editing", "signed-token"),
    ];
    config
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn format_scalar_and_container_values() {
    assert_eq!(format_toml_value(&Value::String("x".to_string())), "\"x\"");
    assert_eq!(format_toml_value(&Value::Boolean(false)), "false");
    assert_eq!(
        format_toml_value(&Value::Array(vec![Value::Integer(1), Value::Integer(2)])),
        "[2]"
    );
}

#[test]
fn registry_lists_all_categories_sorted() {
    let mut registry = CommandRegistry::new(Arc::new(sample_config()));
    registry.register_all_commands();

    let commands = registry.list_commands();

    assert_eq!(
        commands,
        vec![
            (
                "catalog".to_string(),
                vec!["list".to_string(), "media".to_string()]
            ),
            (
                "config".to_string(),
                vec!["get".to_string(), "schema".to_string()]
            ),
        ]
    );
}

#[test]
fn unknown_category_and_command_are_reported() {
    let service = CliService::new(sample_config());

    assert!(matches!(
        service.execute_command("playlist", "list", &[]),
        Err(CliError::CommandNotFound(_))
    ));
    assert!(matches!(
        service.execute_command("catalog", "play", &[]),
        Err(CliError::CommandNotFound(_))
    ));
}

#[test]
fn argument_count_is_validated() {
    let service = CliService::new(sample_config());

    assert!(matches!(
        service.execute_command("catalog", "media", &[]),
        Err(CliError::InvalidArguments(_))
    ));
    assert!(matches!(
        service.execute_command("config", "get", &args(&["a", "b"])),
        Err(CliError::InvalidArguments(_))
    ));
}

#[test]
fn catalog_list_filters_by_category() {
    let service = CliService::new(sample_config());

    let all = service.execute_command("catalog", "list", &[]).unwrap();
    assert!(all.contains("2 video(s) in 'all'"));

    let editing = service
        .execute_command("catalog", "list", &args(&["editing"]))
        .unwrap();
    assert!(editing.contains("cut-1"));
    assert!(editing.contains("[signed]"));
    assert!(!editing.contains("1397757906801587829"));

    let empty = service
        .execute_command("catalog", "list", &args(&["other"]))
        .unwrap();
    assert_eq!(empty, "No videos in category 'other'");
}

#[test]
fn catalog_media_prints_provider_options() {
    let service = CliService::new(sample_config());

    let output = service
        .execute_command("catalog", "media", &args(&["cut-1"]))
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["fileID"], "cut-1");
    assert_eq!(json["appID"], "1310364790");
    assert_eq!(json["psign"], "signed-token");
    assert_eq!(json["autoplay"], true);

    assert!(matches!(
        service.execute_command("catalog", "media", &args(&["missing"])),
        Err(CliError::CatalogError(_))
    ));
}

#[test]
fn config_get_reads_paths() {
    let service = CliService::new(sample_config());

    let output = service
        .execute_command("config", "get", &args(&["player.readiness_timeout_ms"]))
        .unwrap();
    assert_eq!(output, "player.readiness_timeout_ms: 3000");

    assert!(matches!(
        service.execute_command("config", "get", &args(&["player.nope"])),
        Err(CliError::ConfigError(_))
    ));
}

#[test]
fn help_lists_every_command() {
    let service = CliService::new(sample_config());

    let help = service.execute_command("help", "", &[]).unwrap();

    for name in ["catalog", "config", "list", "media", "get", "schema"] {
        assert!(help.contains(name), "help is missing {name}");
    }
}
