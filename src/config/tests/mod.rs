//! Unit tests for config types, defaults and serialization.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::unwrap_used)]

use crate::config::{Config, LogLevel, ReadinessFallback};

#[test]
fn default_player_settings() {
    let config = Config::default();

    assert!(config.player.autoplay);
    assert_eq!(config.player.mount_element_id, "player-container-id");
    assert_eq!(config.player.readiness_timeout_ms, 3000);
    assert_eq!(config.player.create_timeout_ms, 10_000);
    assert_eq!(config.player.readiness_fallback, ReadinessFallback::Ready);
}

#[test]
fn default_catalog_ships_showcase_video() {
    let catalog = Config::default().catalog;

    assert_eq!(catalog.categories, vec!["packaging", "editing", "other"]);
    assert_eq!(catalog.videos[0].id, "1397757906801587829");
    assert_eq!(catalog.videos_in(Some("packaging")).count(), 1);
    assert_eq!(catalog.videos_in(Some("editing")).count(), 0);
}

#[test]
fn explicit_videos_replace_default_catalog() {
    let config: Config = toml::from_str(
        r#"
        [[catalog.videos]]
        id = "cut-1"
        title = "Cut"
        category = "editing"
        "#,
    )
    .unwrap();

    assert_eq!(config.catalog.videos.len(), 1);
    assert_eq!(config.catalog.categories.len(), 3);
}

#[test]
fn empty_toml_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.player, Config::default().player);
}

#[test]
fn partial_player_table_keeps_other_defaults() {
    let config: Config = toml::from_str(
        r#"
        [player]
        readiness_timeout_ms = 500
        readiness_fallback = "error"
        "#,
    )
    .unwrap();

    assert_eq!(config.player.readiness_timeout_ms, 500);
    assert_eq!(config.player.readiness_fallback, ReadinessFallback::Error);
    assert_eq!(config.player.teardown_timeout_ms, 1000);
}

#[test]
fn catalog_entries_deserialize() {
    let config: Config = toml::from_str(
        r#"
        [catalog]
        categories = ["packaging", "editing"]

        [[catalog.videos]]
        id = "1397757906801587829"
        title = "Intro"
        category = "packaging"

        [[catalog.videos]]
        id = "v2"
        title = "Cut"
        category = "editing"
        access_token = "signed"
        "#,
    )
    .unwrap();

    assert_eq!(config.catalog.videos.len(), 2);
    assert_eq!(config.catalog.videos[0].access_token, "");
    assert_eq!(config.catalog.video("v2").unwrap().access_token, "signed");
    assert_eq!(config.catalog.videos_in(Some("editing")).count(), 1);
    assert_eq!(config.catalog.videos_in(None).count(), 2);
}

#[test]
fn get_by_path_reads_nested_values() {
    let mut config = Config::default();
    config.catalog.videos = vec![crate::config::VideoEntry {
        id: "v1".to_string(),
        title: "First".to_string(),
        description: String::new(),
        thumbnail: String::new(),
        access_token: String::new(),
        category: "other".to_string(),
    }];

    assert_eq!(
        config.get_by_path("player.autoplay").unwrap().as_bool(),
        Some(true)
    );
    assert_eq!(
        config.get_by_path("catalog.videos.0.title").unwrap().as_str(),
        Some("First")
    );
    assert!(config.get_by_path("player.missing").is_err());
    assert!(config.get_by_path("catalog.videos.7").is_err());
}

#[test]
fn serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(original.player, deserialized.player);
    assert_eq!(original.catalog, deserialized.catalog);
}

#[test]
fn schema_describes_player_section() {
    let schema = serde_json::to_value(Config::schema()).unwrap();

    assert!(schema["properties"]["player"].is_object());
}
