//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Native window settings.
///
/// The shell opens exactly one window of this size and title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Static window title.
    pub title: String,
    /// Logical width in pixels (valid range: 320-7680).
    pub width: u32,
    /// Logical height in pixels (valid range: 240-4320).
    pub height: u32,
    /// Whether the webview exposes dev tools (on by default in debug builds).
    pub devtools: bool,
    /// Custom user agent string for the webview.
    pub user_agent: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "BlurkitTool".into(),
            width: 1400,
            height: 900,
            devtools: cfg!(debug_assertions),
            user_agent: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
