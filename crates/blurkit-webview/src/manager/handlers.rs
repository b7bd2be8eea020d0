use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::types::BLANK_PAGE;
use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Navigation allowlist: the worker origin plus the blank page.
///
/// A URL is allowed when it is exactly the origin or the origin followed by
/// a path, query or fragment, so `http://127.0.0.1:50000` does not pass for
/// `http://127.0.0.1:5000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPolicy {
    origin: String,
}

impl NavigationPolicy {
    /// Build a policy from the worker endpoint URL.
    pub fn for_endpoint(endpoint: &str) -> Self {
        Self {
            origin: origin_of(endpoint).to_ascii_lowercase(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        if url == BLANK_PAGE {
            return true;
        }
        if self.origin.is_empty() {
            return false;
        }
        let Some(head) = url.get(..self.origin.len()) else {
            return false;
        };
        let rest = &url[self.origin.len()..];
        head.eq_ignore_ascii_case(&self.origin)
            && matches!(rest.chars().next(), None | Some('/' | '?' | '#'))
    }
}

/// `scheme://authority` part of a URL, or "" if it has no scheme.
fn origin_of(url: &str) -> &str {
    let Some(scheme_end) = url.find("://") else {
        return "";
    };
    let authority_start = scheme_end + 3;
    let authority_len = url[authority_start..]
        .find(['/', '?', '#'])
        .unwrap_or(url.len() - authority_start);
    &url[..authority_start + authority_len]
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

fn push(events: &Mutex<Vec<WebViewEvent>>, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

impl WebViewManager {
    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            push(&events, WebViewEvent::PageLoad { state, url });
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(title = %title, "title changed");
            push(&events, WebViewEvent::TitleChanged { title });
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        policy: NavigationPolicy,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if policy.is_allowed(&url) {
                return true;
            }
            warn!(url = %url, origin = %policy.origin(), "navigation blocked: URL not in allowlist");
            push(&events, WebViewEvent::NavigationBlocked { url });
            false
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
