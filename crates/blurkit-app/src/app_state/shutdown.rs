//! Shutdown: stop the probe, terminate the worker, close the window.

use std::time::Duration;

use blurkit_supervisor::ExitTrigger;

use crate::crash;

use super::core::BlurkitApp;
use super::types::AppPhase;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl BlurkitApp {
    /// Tear everything down. Safe to call from every exit path, any number
    /// of times: each call after the first only logs the trigger.
    ///
    /// Order:
    /// 1. Abort the readiness probe
    /// 2. Terminate the worker
    /// 3. Destroy the webview, then the window
    /// 4. Shut down the tokio runtime
    pub fn shutdown(&mut self, trigger: ExitTrigger) {
        if self.phase.advance(AppPhase::Closing) {
            tracing::info!(%trigger, "Initiating shutdown");
        }

        // 1. Probe first, it may be holding a connection to the worker
        if let Some(probe) = self.probe.take() {
            probe.abort();
        }

        // 2. Worker
        self.supervisor.terminate(trigger);
        crash::disarm();

        // 3. Webview must go before its parent window
        self.webview = None;
        self.window = None;

        // 4. Runtime
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_millis(500));
        }

        if self.phase.advance(AppPhase::Terminated) {
            tracing::info!("Shutdown complete");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::app_state::core::BlurkitApp;
    use crate::app_state::types::AppPhase;
    use blurkit_config::schema::BlurkitConfig;
    use blurkit_supervisor::ExitTrigger;

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let mut app = BlurkitApp::new(BlurkitConfig::default());

        app.shutdown(ExitTrigger::WindowClosed);

        assert_eq!(app.phase, AppPhase::Terminated);
        assert!(!app.supervisor.is_running());
        assert!(app.probe.is_none());
        assert!(app.tokio_runtime.is_none());
        assert!(app.webview.is_none());
        assert!(app.window.is_none());
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut app = BlurkitApp::new(BlurkitConfig::default());

        for trigger in ExitTrigger::ALL {
            app.shutdown(trigger);
        }

        assert_eq!(app.phase, AppPhase::Terminated);
        assert!(!app.supervisor.is_running());
    }

    #[test]
    fn shutdown_blocks_later_navigation() {
        let mut app = BlurkitApp::new(BlurkitConfig::default());
        app.endpoint_ready = true;

        app.shutdown(ExitTrigger::EventLoopExiting);
        app.navigate_if_ready();

        assert_eq!(app.phase, AppPhase::Terminated);
    }

    #[cfg(unix)]
    #[test]
    fn shutdown_kills_running_worker() {
        use blurkit_supervisor::WorkerCommand;

        let mut app = BlurkitApp::new(BlurkitConfig::default());
        let pid = app
            .supervisor
            .start(&WorkerCommand::new("/bin/sh").args(["-c", "exec sleep 60"]))
            .unwrap();
        assert!(app.supervisor.is_running());

        app.shutdown(ExitTrigger::WindowClosed);

        assert!(!app.supervisor.is_running());
        assert_eq!(app.supervisor.pid(), None);
        let alive = unsafe { libc::kill(pid as libc::pid_t, 0) == 0 };
        assert!(!alive, "worker {pid} survived shutdown");

        // Later triggers find nothing to do.
        app.shutdown(ExitTrigger::AllWindowsClosed);
        app.shutdown(ExitTrigger::HostExit);
        assert_eq!(app.supervisor.last_exit().map(|r| r.pid), Some(pid));
    }

    #[cfg(unix)]
    #[test]
    fn worker_exit_before_ready_still_navigates() {
        use blurkit_supervisor::WorkerCommand;
        use std::time::{Duration, Instant};

        let mut app = BlurkitApp::new(BlurkitConfig::default());
        app.phase.advance(AppPhase::Starting);
        app.supervisor
            .start(&WorkerCommand::new("/bin/sh").args(["-c", "exit 1"]))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while !app.endpoint_ready && Instant::now() < deadline {
            app.poll_worker();
            std::thread::sleep(Duration::from_millis(20));
        }

        assert!(app.endpoint_ready);
        assert_eq!(app.supervisor.last_exit().and_then(|r| r.code), Some(1));
        assert!(!app.supervisor.is_running());
    }
}
