/// The page shown before the worker endpoint is known to answer.
pub const BLANK_PAGE: &str = "about:blank";

/// Configuration for creating the webview.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL. `None` shows the blank page.
    pub url: Option<String>,
    /// Whether to enable dev tools.
    pub devtools: bool,
    /// Custom user agent string. `None` keeps the engine default.
    pub user_agent: Option<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            devtools: cfg!(debug_assertions),
            user_agent: None,
        }
    }
}

impl WebViewConfig {
    /// The URL the webview starts on.
    pub fn initial_url(&self) -> &str {
        self.url.as_deref().unwrap_or(BLANK_PAGE)
    }
}
