//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_blurkit_config.toml"));
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(err, blurkit_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[worker]
hide_console = false

[window]
title = "Blurkit Dev"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!(!config.worker.hide_console);
    assert_eq!(config.window.title, "Blurkit Dev");
    // Defaults preserved
    assert_eq!(config.worker.name, "BlurkitTool");
    assert_eq!(config.window.width, 1400);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(err, blurkit_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_returns_parsed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[readiness]
interval_ms = 1
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.readiness.interval_ms, 1);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blurkit").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.title, "BlurkitTool");
    assert!(config.worker.hide_console);
}

#[test]
fn create_default_config_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[window]\nwidth = 1600\n").unwrap();

    assert!(create_default_config(&path).is_err());
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("1600"));
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::BlurkitConfig;

    let content = default_config_toml();
    let config: BlurkitConfig = toml::from_str(&content).unwrap();
    assert_eq!(config.worker.name, "BlurkitTool");
    assert!(crate::validation::validate(&config).is_ok());
    assert!(!content.contains("port ="));
    assert!(!content.contains("args ="));
}

#[test]
fn default_config_path_is_reasonable() {
    // This may not work in all CI environments, but should work locally
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("blurkit"));
        assert!(path_str.ends_with("config.toml"));
    }
}
