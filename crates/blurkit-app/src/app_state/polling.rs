//! Periodic polling of the worker, the readiness probe, and webview events.

use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use blurkit_webview::WebViewEvent;

use crate::crash;

use super::core::BlurkitApp;
use super::types::{AppPhase, POLL_INTERVAL};

impl BlurkitApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_worker();
            self.poll_readiness();
            self.poll_webview_events();
            self.navigate_if_ready();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Observe a worker exit. Nothing is restarted.
    pub(super) fn poll_worker(&mut self) {
        if self.supervisor.poll().is_none() {
            return;
        }
        crash::disarm();

        if let Some(probe) = self.probe.take() {
            probe.abort();
            tracing::warn!("Worker exited before its endpoint answered; showing it anyway");
        }
        self.endpoint_ready = true;
    }

    pub(super) fn poll_readiness(&mut self) {
        let Some(probe) = &self.probe else {
            return;
        };
        if let Some(outcome) = probe.try_outcome() {
            tracing::debug!(?outcome, "readiness probe finished");
            self.probe = None;
            self.endpoint_ready = true;
        }
    }

    /// Drain and log webview events.
    pub(super) fn poll_webview_events(&mut self) {
        for event in self.webviews.drain_events() {
            match event {
                WebViewEvent::PageLoad { state, url } => {
                    tracing::debug!(?state, url = %url, "page load");
                }
                WebViewEvent::TitleChanged { title } => {
                    tracing::debug!(title = %title, "page title");
                }
                WebViewEvent::NavigationBlocked { url } => {
                    tracing::info!(url = %url, "page tried to leave the worker origin");
                }
            }
        }
    }

    /// Point the webview at the worker once navigation is due.
    pub(super) fn navigate_if_ready(&mut self) {
        if !self.endpoint_ready || self.phase != AppPhase::Starting {
            return;
        }
        let Some(webview) = self.webview.as_mut() else {
            return;
        };

        match webview.load_url(&self.endpoint) {
            Ok(()) => tracing::info!(url = %self.endpoint, "Showing worker UI"),
            Err(e) => tracing::error!(url = %self.endpoint, "Failed to navigate webview: {e}"),
        }
        // No retry either way.
        self.phase.advance(AppPhase::Ready);
    }
}
