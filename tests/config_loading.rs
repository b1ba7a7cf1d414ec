//! Integration tests for config file loading and imports.

#![allow(clippy::unwrap_used)]

use std::{fs, path::PathBuf};

use showreel::{
    ShowreelError,
    config::{Config, LogLevel, ReadinessFallback},
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

mod basic_loading {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        let config = Config::load_with_imports(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.player.readiness_timeout_ms, 3000);
        assert_eq!(config.catalog.videos[0].id, "1397757906801587829");
    }

    #[test]
    fn loads_all_sections() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config.toml",
            r#"
[general]
log_level = "debug"

[player]
autoplay = false
readiness_timeout_ms = 5000
readiness_fallback = "error"

[catalog]
categories = ["packaging"]

[[catalog.videos]]
id = "1397757906801587829"
title = "Product box"
category = "packaging"
"#,
        );

        let config = Config::load_with_imports(&path).unwrap();

        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert!(!config.player.autoplay);
        assert_eq!(config.player.readiness_timeout_ms, 5000);
        assert_eq!(config.player.readiness_fallback, ReadinessFallback::Error);
        assert_eq!(config.player.provider_app_id, "1310364790");
        assert_eq!(config.catalog.videos.len(), 1);
        assert_eq!(config.catalog.videos[0].access_token, "");
    }

    #[test]
    fn invalid_toml_reports_location() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.toml", "[player\nautoplay = true");

        let err = Config::load_with_imports(&path).unwrap_err();

        let ShowreelError::TomlParseError { location, .. } = err else {
            panic!("expected a parse error, got {err:?}");
        };
        assert!(location.ends_with("config.toml"));
    }

    #[test]
    fn wrong_value_type_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.toml", "[player]\nautoplay = \"yes\"\n");

        assert!(matches!(
            Config::load_with_imports(&path),
            Err(ShowreelError::ConfigValidation { .. })
        ));
    }
}

mod imports {
    use super::*;

    #[test]
    fn imported_catalog_is_merged() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "catalog.toml",
            r#"
[[catalog.videos]]
id = "cut-1"
title = "Cut"
category = "editing"
"#,
        );
        let path = write(
            &dir,
            "config.toml",
            "imports = [\"@catalog\"]\n\n[player]\nautoplay = false\n",
        );

        let config = Config::load_with_imports(&path).unwrap();

        assert_eq!(config.catalog.videos[0].id, "cut-1");
        assert!(!config.player.autoplay);
    }

    #[test]
    fn main_file_overrides_imports() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "timing.toml",
            "[player]\nreadiness_timeout_ms = 1000\nteardown_timeout_ms = 250\n",
        );
        let path = write(
            &dir,
            "config.toml",
            "imports = [\"@timing.toml\"]\n\n[player]\nreadiness_timeout_ms = 8000\n",
        );

        let config = Config::load_with_imports(&path).unwrap();

        assert_eq!(config.player.readiness_timeout_ms, 8000);
        assert_eq!(config.player.teardown_timeout_ms, 250);
    }

    #[test]
    fn later_imports_override_earlier_ones() {
        let dir = TempDir::new().unwrap();
        write(&dir, "parts/a.toml", "[general]\nlog_level = \"warn\"\n");
        write(&dir, "parts/b.toml", "[general]\nlog_level = \"trace\"\n");
        let path = write(
            &dir,
            "config.toml",
            "imports = [\"@parts/a\", \"@parts/b\"]\n",
        );

        let config = Config::load_with_imports(&path).unwrap();

        assert_eq!(config.general.log_level, LogLevel::Trace);
    }

    #[test]
    fn missing_import_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.toml", "imports = [\"@nowhere\"]\n");

        assert!(matches!(
            Config::load_with_imports(&path),
            Err(ShowreelError::ImportError { .. })
        ));
    }

    #[test]
    fn circular_imports_are_detected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.toml", "imports = [\"@b\"]\n");
        write(&dir, "b.toml", "imports = [\"@a\"]\n");
        let path = write(&dir, "config.toml", "imports = [\"@a\"]\n");

        let err = Config::load_with_imports(&path).unwrap_err();

        assert!(err.to_string().contains("Circular import detected"));
    }

    #[test]
    fn diamond_imports_are_not_circular() {
        let dir = TempDir::new().unwrap();
        write(&dir, "shared.toml", "[player]\nautoplay = false\n");
        write(&dir, "a.toml", "imports = [\"@shared\"]\n");
        write(&dir, "b.toml", "imports = [\"@shared\"]\n");
        let path = write(&dir, "config.toml", "imports = [\"@a\", \"@b\"]\n");

        let config = Config::load_with_imports(&path).unwrap();

        assert!(!config.player.autoplay);
    }
}
