//! WebView lifecycle management.
//!
//! `WebViewManager` builds the single `wry::WebView` hosted by the main
//! window and collects the events its callbacks produce.

use std::sync::{Arc, Mutex};

use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use handlers::NavigationPolicy;
pub use types::{WebViewConfig, BLANK_PAGE};

pub struct WebViewManager {
    /// Event sink. Callbacks push here, the host loop drains.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    policy: NavigationPolicy,
}

impl WebViewManager {
    pub fn new(policy: NavigationPolicy) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            policy,
        }
    }

    pub fn policy(&self) -> &NavigationPolicy {
        &self.policy
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}
