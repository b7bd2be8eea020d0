//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the shell's own crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "blurkit=trace",
            LogLevel::Debug => "blurkit=debug",
            LogLevel::Info => "blurkit=info",
            LogLevel::Warning => "blurkit=warn",
            LogLevel::Error => "blurkit=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Forward the worker's stdout/stderr lines into the log.
    pub worker_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            worker_output: true,
        }
    }
}
