//! BlurkitApp struct definition and constructor.

use std::time::Instant;

use winit::window::Window;

use blurkit_config::schema::{BlurkitConfig, WorkerConfig};
use blurkit_supervisor::{create_kill_strategy, ReadinessProbe, Supervisor};
use blurkit_webview::{NavigationPolicy, WebViewHandle, WebViewManager};

use super::types::AppPhase;

/// Top-level application state.
pub struct BlurkitApp {
    pub(super) config: BlurkitConfig,
    /// `http://host:port` the worker serves.
    pub(super) endpoint: String,
    pub(super) phase: AppPhase,

    // Worker
    pub(super) supervisor: Supervisor,
    pub(super) probe: Option<ReadinessProbe>,
    /// Set once navigation should happen: probe finished, worker gone, or
    /// no probe could run.
    pub(super) endpoint_ready: bool,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    // Windowing. The webview is declared first so it drops before its parent.
    pub(super) webviews: WebViewManager,
    pub(super) webview: Option<WebViewHandle>,
    pub(super) window: Option<Window>,

    pub(super) last_poll: Instant,
}

impl BlurkitApp {
    pub fn new(config: BlurkitConfig) -> Self {
        let endpoint = WorkerConfig::endpoint_url();
        let supervisor =
            Supervisor::new(create_kill_strategy()).with_reap_timeout(config.shutdown.reap_timeout());
        Self {
            webviews: WebViewManager::new(NavigationPolicy::for_endpoint(&endpoint)),
            endpoint,
            config,
            phase: AppPhase::NotStarted,
            supervisor,
            probe: None,
            endpoint_ready: false,
            tokio_runtime: None,
            webview: None,
            window: None,
            last_poll: Instant::now(),
        }
    }
}
