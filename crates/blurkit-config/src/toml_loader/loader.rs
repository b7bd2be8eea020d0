//! Core TOML config loading: read from path or platform default.

use crate::schema::BlurkitConfig;
use blurkit_common::ConfigError;
use std::path::Path;
use tracing::{debug, info};

use super::paths::default_config_path;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// Values are not validated here; `load_config` does that once.
pub fn load_from_path(path: &Path) -> Result<BlurkitConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: BlurkitConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/blurkit/config.toml`
/// On Linux: `~/.config/blurkit/config.toml`
/// On Windows: `%APPDATA%\blurkit\config.toml`
///
/// The file is optional. When it does not exist the built-in defaults are
/// returned and nothing is written to disk.
pub fn load_default() -> Result<BlurkitConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        debug!("no config at {}, using built-in defaults", path.display());
        return Ok(BlurkitConfig::default());
    }

    load_from_path(&path)
}
