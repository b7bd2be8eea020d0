//! Worker launch and readiness probing.

use blurkit_config::schema::{ReadinessConfig, WorkerConfig};
use blurkit_supervisor::{ReadinessPolicy, ReadinessProbe, WorkerCommand, WorkerLayout};

use crate::crash;

use super::core::BlurkitApp;
use super::types::AppPhase;

pub(super) fn readiness_policy(config: &ReadinessConfig) -> ReadinessPolicy {
    ReadinessPolicy {
        timeout: config.timeout(),
        interval: config.interval(),
        request_timeout: config.request_timeout(),
    }
}

impl BlurkitApp {
    /// Launch the worker and start probing its endpoint.
    ///
    /// Never fails: a worker that cannot be launched is logged, and the
    /// window will still be pointed at the endpoint.
    pub fn start_worker(&mut self) {
        if !self.phase.advance(AppPhase::Starting) {
            return;
        }

        let layout = match WorkerLayout::current(&self.config.worker.name) {
            Ok(layout) => layout,
            Err(e) => {
                tracing::error!("Cannot locate worker: {e}");
                self.endpoint_ready = true;
                return;
            }
        };
        tracing::info!(
            mode = %layout.mode,
            executable = %layout.executable.display(),
            kill_strategy = self.supervisor.strategy_name(),
            "Worker layout resolved"
        );

        let command = self.worker_command(layout);
        if self.supervisor.start(&command).is_err() {
            // Already logged by the supervisor.
            self.endpoint_ready = true;
            return;
        }
        if let Some(target) = self.supervisor.kill_target() {
            crash::arm(target);
        }

        self.start_probe();
    }

    pub(super) fn worker_command(&self, layout: WorkerLayout) -> WorkerCommand {
        WorkerCommand::new(layout.executable)
            .args(WorkerConfig::ARGS.iter().copied())
            .hide_console(self.config.worker.hide_console)
            .forward_output(self.config.logging.worker_output)
    }

    /// Run the readiness probe on a one-worker tokio runtime.
    fn start_probe(&mut self) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build();

        match rt {
            Ok(rt) => {
                let policy = readiness_policy(&self.config.readiness);
                self.probe = Some(ReadinessProbe::spawn(
                    rt.handle(),
                    self.endpoint.clone(),
                    policy,
                ));
                self.tokio_runtime = Some(rt);
            }
            Err(e) => {
                tracing::warn!("Failed to start tokio runtime for readiness probe: {e}");
                self.endpoint_ready = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use blurkit_config::schema::BlurkitConfig;
    use blurkit_supervisor::RunMode;

    #[test]
    fn policy_follows_config() {
        let config = ReadinessConfig {
            timeout_ms: 5000,
            interval_ms: 100,
            request_timeout_ms: 500,
        };
        let policy = readiness_policy(&config);
        assert_eq!(policy.timeout, Duration::from_secs(5));
        assert_eq!(policy.interval, Duration::from_millis(100));
        assert_eq!(policy.request_timeout, Duration::from_millis(500));
    }

    #[test]
    fn default_config_matches_default_policy() {
        let policy = readiness_policy(&ReadinessConfig::default());
        assert_eq!(policy, ReadinessPolicy::default());
    }

    #[test]
    fn command_passes_no_browser_only() {
        let app = BlurkitApp::new(BlurkitConfig::default());
        let layout = WorkerLayout {
            mode: RunMode::Packaged,
            executable: PathBuf::from("/opt/blurkit/resources/BlurkitTool"),
        };
        let command = app.worker_command(layout);
        assert_eq!(command.executable, PathBuf::from("/opt/blurkit/resources/BlurkitTool"));
        assert_eq!(command.args, vec!["--no-browser"]);
        assert!(command.hide_console);
        assert!(command.forward_output);
    }

    #[test]
    fn config_file_cannot_drop_no_browser_or_move_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[worker]\nargs = []\nport = 5050\n").unwrap();
        let config = blurkit_config::load_config(Some(path.as_path())).unwrap();

        let app = BlurkitApp::new(config);
        let command = app.worker_command(WorkerLayout {
            mode: RunMode::Development,
            executable: PathBuf::from("dist/BlurkitTool"),
        });
        assert_eq!(command.args, vec!["--no-browser"]);
        assert_eq!(app.endpoint, "http://127.0.0.1:5000");
    }
}
