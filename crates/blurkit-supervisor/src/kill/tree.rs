//! Windows process-tree termination via `taskkill`.
//!
//! The strategy itself is plain logic over a `CommandRunner`, so the
//! fallback order can be exercised on any platform.

use std::process::{Command, Stdio};

use tracing::{debug, warn};

use super::{KillOutcome, KillStrategy, KillTarget};

pub const TASKKILL: &str = "taskkill";

/// Runs an external command and reports whether it exited successfully.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<bool>;
}

/// Runs commands for real, silently.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<bool> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(crate::CREATE_NO_WINDOW);
        }

        Ok(cmd.status()?.success())
    }
}

/// Kill the process tree rooted at the worker, then sweep by image name.
pub struct TreeKill<R: CommandRunner = SystemRunner> {
    runner: R,
}

impl<R: CommandRunner> TreeKill<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// `taskkill /PID <pid> /T /F`: forceful, whole tree.
    pub fn tree_kill_args(pid: u32) -> Vec<String> {
        vec!["/PID".into(), pid.to_string(), "/T".into(), "/F".into()]
    }

    /// `taskkill /IM <image> /F`: forceful, every process with that image.
    pub fn by_name_args(image_name: &str) -> Vec<String> {
        vec!["/IM".into(), image_name.to_string(), "/F".into()]
    }
}

impl<R: CommandRunner> KillStrategy for TreeKill<R> {
    fn name(&self) -> &'static str {
        "tree-kill"
    }

    fn kill(&self, target: &KillTarget) -> KillOutcome {
        match self.runner.run(TASKKILL, &Self::tree_kill_args(target.pid)) {
            Ok(true) => {
                debug!(pid = target.pid, "worker process tree killed");
                return KillOutcome::Killed;
            }
            Ok(false) => warn!(pid = target.pid, "tree-kill failed; falling back to kill by name"),
            Err(e) => warn!(
                pid = target.pid,
                error = %e,
                "tree-kill could not run; falling back to kill by name"
            ),
        }

        if target.image_name.is_empty() {
            return KillOutcome::Failed("tree-kill failed and worker image name is unknown".into());
        }

        match self.runner.run(TASKKILL, &Self::by_name_args(&target.image_name)) {
            Ok(true) => KillOutcome::KilledByName,
            Ok(false) => KillOutcome::Failed(format!(
                "tree-kill and kill by name ({}) both failed",
                target.image_name
            )),
            Err(e) => KillOutcome::Failed(format!(
                "tree-kill failed and kill by name ({}) could not run: {e}",
                target.image_name
            )),
        }
    }

    /// The worker is gone but helpers it forked may still hold the port.
    fn sweep_exited(&self, target: &KillTarget) -> KillOutcome {
        if target.image_name.is_empty() {
            return KillOutcome::Failed("worker image name is unknown; nothing to sweep".into());
        }

        match self.runner.run(TASKKILL, &Self::by_name_args(&target.image_name)) {
            Ok(true) => KillOutcome::KilledByName,
            Ok(false) => KillOutcome::Failed(format!(
                "kill by name ({}) found nothing or failed",
                target.image_name
            )),
            Err(e) => KillOutcome::Failed(format!(
                "kill by name ({}) could not run: {e}",
                target.image_name
            )),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
