//! Worker process configuration types.

use serde::{Deserialize, Serialize};

/// How the bundled worker executable is invoked.
///
/// The executable location itself is not configurable; only its base name
/// is, and the supervisor resolves the directory from the run layout.
///
/// The worker's address and arguments are fixed: the server binds
/// `127.0.0.1:5000` on its own and is never told otherwise, so letting the
/// host look elsewhere would only point the window at nothing. Stale
/// `host`, `port` or `args` keys in a config file are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Executable base name, without the platform suffix.
    pub name: String,
    /// Hide the worker's console window (Windows only).
    pub hide_console: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: "BlurkitTool".into(),
            hide_console: true,
        }
    }
}

impl WorkerConfig {
    /// Host the worker binds to.
    pub const HOST: &'static str = "127.0.0.1";
    /// Port the worker binds to.
    pub const PORT: u16 = 5000;
    /// Arguments the worker is always launched with. Without
    /// `--no-browser` it opens a system browser tab of its own.
    pub const ARGS: &'static [&'static str] = &["--no-browser"];

    /// Plain HTTP URL of the worker's served UI.
    pub fn endpoint_url() -> String {
        format!("http://{}:{}", Self::HOST, Self::PORT)
    }
}

// =============================================================================
// Tests
// =============================================================================
