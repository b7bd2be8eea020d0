//! Embedded webview for the Blurkit window.
//!
//! Wraps `wry` to provide:
//! - a single child webview filling the host window
//! - a navigation allowlist pinned to the worker origin
//! - page-load and title events queued for the host event loop
//!
//! There is no IPC bridge: page scripts get no access to the host.

pub mod bounds;
pub mod events;
pub mod manager;

pub use bounds::logical_bounds;
pub use events::{PageLoadState, WebViewEvent};
pub use manager::{NavigationPolicy, WebViewConfig, WebViewHandle, WebViewManager, BLANK_PAGE};
