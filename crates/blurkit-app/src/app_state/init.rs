//! Window creation and webview setup.

use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use blurkit_common::WindowError;
use blurkit_config::schema::WindowConfig;
use blurkit_webview::{logical_bounds, WebViewConfig};

/// Native window attributes for the configured title and size.
pub(super) fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(LogicalSize::new(
            f64::from(config.width),
            f64::from(config.height),
        ))
}

/// Wrap a native window failure for the host's error type.
pub(super) fn window_create_error(err: impl std::fmt::Display) -> WindowError {
    WindowError::Create(err.to_string())
}

use super::core::BlurkitApp;
use super::types::AppPhase;

impl BlurkitApp {
    /// Whether a resume should open the window.
    ///
    /// Closing the window quits the app, so a later resume (a macOS dock
    /// click, say) never re-creates it.
    pub(super) fn wants_window(&self) -> bool {
        self.window.is_none() && self.phase < AppPhase::Closing
    }

    /// Create the window and its webview.
    /// On error nothing is kept and the event loop should exit.
    pub(super) fn initialize_window(
        &mut self,
        event_loop: &ActiveEventLoop,
    ) -> Result<(), WindowError> {
        let window_config = &self.config.window;
        let window = event_loop
            .create_window(window_attributes(window_config))
            .map_err(window_create_error)?;

        let size = window.inner_size().to_logical::<f64>(window.scale_factor());
        let webview_config = WebViewConfig {
            // Blank until the endpoint answers.
            url: None,
            devtools: window_config.devtools,
            user_agent: window_config.user_agent.clone(),
        };

        let webview = self.webviews.create(
            &window,
            logical_bounds(size.width, size.height),
            &webview_config,
        )?;

        tracing::info!(
            title = %window_config.title,
            width = window_config.width,
            height = window_config.height,
            origin = %self.webviews.policy().origin(),
            "Window opened"
        );

        self.webview = Some(webview);
        self.window = Some(window);
        Ok(())
    }

    /// Keep the webview covering the whole client area.
    pub(super) fn sync_webview_bounds(&self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        let (Some(window), Some(webview)) = (&self.window, &self.webview) else {
            return;
        };
        let logical = size.to_logical::<f64>(window.scale_factor());
        if let Err(e) = webview.set_bounds(logical_bounds(logical.width, logical.height)) {
            tracing::warn!("Failed to resize webview: {e}");
        }
    }
}
