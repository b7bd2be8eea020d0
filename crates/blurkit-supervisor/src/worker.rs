//! Worker process spawn and handle.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use blurkit_common::SupervisorError;

use crate::output::{forward_lines, log_line, Stream};

/// How often `reap` re-checks a killed worker.
const REAP_POLL_INTERVAL: Duration = Duration::from_millis(20);

// =============================================================================
// COMMAND
// =============================================================================

/// Everything needed to launch the worker.
#[derive(Debug, Clone)]
pub struct WorkerCommand {
    pub executable: PathBuf,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    /// Suppress the console window on Windows. Ignored elsewhere.
    pub hide_console: bool,
    /// Forward stdout/stderr lines into the log. When off, output is discarded.
    pub forward_output: bool,
}

impl WorkerCommand {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            env: Vec::new(),
            hide_console: true,
            forward_output: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn hide_console(mut self, hide: bool) -> Self {
        self.hide_console = hide;
        self
    }

    pub fn forward_output(mut self, forward: bool) -> Self {
        self.forward_output = forward;
        self
    }

    /// Build the OS command. The child stays in our process group so the
    /// parent/child association is preserved.
    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null());

        if self.forward_output {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            if self.hide_console {
                cmd.creation_flags(crate::CREATE_NO_WINDOW);
            }
        }

        cmd
    }
}

// =============================================================================
// PROCESS HANDLE
// =============================================================================

/// A spawned worker. Owned exclusively by the `Supervisor`.
#[derive(Debug)]
pub struct WorkerProcess {
    child: Child,
    pid: u32,
    executable: PathBuf,
    started_at: Instant,
    status: Option<ExitStatus>,
}

impl WorkerProcess {
    /// Spawn the worker described by `command`.
    pub(crate) fn spawn(command: &WorkerCommand) -> Result<Self, SupervisorError> {
        let executable = &command.executable;
        if !executable.exists() {
            return Err(SupervisorError::ExecutableNotFound(executable.clone()));
        }

        debug!(
            executable = %executable.display(),
            args = ?command.args,
            "spawning worker"
        );

        let mut child = command.to_command().spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SupervisorError::ExecutableNotFound(executable.clone())
            } else {
                SupervisorError::Spawn {
                    path: executable.clone(),
                    source: e,
                }
            }
        })?;
        let pid = child.id();

        if let Some(stdout) = child.stdout.take() {
            if let Err(e) = forward_lines(stdout, Stream::Stdout, move |line| {
                log_line(pid, Stream::Stdout, line)
            }) {
                warn!(pid, error = %e, "could not start stdout reader; output dropped");
            }
        }
        if let Some(stderr) = child.stderr.take() {
            if let Err(e) = forward_lines(stderr, Stream::Stderr, move |line| {
                log_line(pid, Stream::Stderr, line)
            }) {
                warn!(pid, error = %e, "could not start stderr reader; output dropped");
            }
        }

        info!(pid, executable = %executable.display(), "worker started");

        Ok(Self {
            child,
            pid,
            executable: executable.clone(),
            started_at: Instant::now(),
            status: None,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// File name of the executable, used for by-name termination.
    pub fn image_name(&self) -> String {
        self.executable
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Exit code, once the process has terminated with one.
    pub fn exit_code(&self) -> Option<i32> {
        self.status.and_then(|s| s.code())
    }

    pub fn is_alive(&self) -> bool {
        self.status.is_none()
    }

    /// Non-blocking exit check.
    pub(crate) fn try_exit(&mut self) -> std::io::Result<Option<ExitStatus>> {
        if let Some(status) = self.status {
            return Ok(Some(status));
        }
        let status = self.child.try_wait()?;
        self.status = status;
        Ok(status)
    }

    /// Wait up to `timeout` for the process to be reaped.
    pub(crate) fn reap(&mut self, timeout: Duration) -> Option<ExitStatus> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.try_exit() {
                Ok(Some(status)) => return Some(status),
                Ok(None) => {}
                Err(e) => {
                    warn!(pid = self.pid, error = %e, "failed to inspect worker state");
                    return None;
                }
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(REAP_POLL_INTERVAL);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
