//! Blurkit configuration system.
//!
//! Provides an optional TOML config file with full validation. Every
//! section uses serde defaults, so a missing file or a partial file yields
//! the built-in behavior: a 1400x900 `BlurkitTool` window pointed at a
//! worker serving `http://127.0.0.1:5000`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use blurkit_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{BlurkitConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use blurkit_common::ConfigError;

/// Load config from an explicit path, or from the platform default path.
///
/// An explicit path must exist. The default path is optional: when no file
/// is there, built-in defaults are returned and nothing is written.
/// The result is validated either way.
pub fn load_config(override_path: Option<&Path>) -> Result<BlurkitConfig, ConfigError> {
    let config = match override_path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)?
        }
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BlurkitConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
