use std::sync::Arc;

use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use blurkit_common::WindowError;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create the webview as a child of `window`, positioned at `bounds`.
    ///
    /// No IPC handler, initialization script or custom protocol is
    /// registered.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: &WebViewConfig,
    ) -> Result<WebViewHandle, WindowError> {
        let initial_url = config.initial_url().to_string();

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_focused(true)
            .with_url(&initial_url);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_page_load_handler(builder, Arc::clone(&self.events));
        builder = Self::attach_title_handler(builder, Arc::clone(&self.events));
        builder = Self::attach_navigation_handler(
            builder,
            Arc::clone(&self.events),
            self.policy().clone(),
        );

        let webview = builder
            .build_as_child(window)
            .map_err(|e| WindowError::WebView(e.to_string()))?;

        debug!(url = %initial_url, "WebView created");

        Ok(WebViewHandle { webview })
    }
}
