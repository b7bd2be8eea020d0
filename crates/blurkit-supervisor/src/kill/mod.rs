//! Platform kill strategies.
//!
//! A plain kill of the worker handle is enough on Unix, where `SIGKILL`
//! cannot be caught. On Windows the worker may have forked helper processes
//! that survive the parent and keep the port bound, so the whole process
//! tree is killed instead, with a by-name sweep as the fallback. The same
//! sweep runs after a worker exits on its own, since its helpers outlive it.

#[cfg(unix)]
mod signal;
mod tree;

#[cfg(unix)]
pub use signal::SignalKill;
pub use tree::{CommandRunner, SystemRunner, TreeKill, TASKKILL};

/// The process a strategy should kill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillTarget {
    pub pid: u32,
    /// Executable file name, for by-name fallbacks (`BlurkitTool.exe`).
    pub image_name: String,
}

/// Result of a kill attempt. Never an error: callers only log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillOutcome {
    /// The primary strategy succeeded.
    Killed,
    /// The primary strategy failed and the by-name fallback succeeded.
    KilledByName,
    /// The worker was already gone and the strategy had nothing left to kill.
    NothingToKill,
    /// Every attempt failed.
    Failed(String),
}

impl KillOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, KillOutcome::Failed(_))
    }
}

/// Platform-specific way of forcefully terminating the worker.
pub trait KillStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Kill a worker that is still running.
    fn kill(&self, target: &KillTarget) -> KillOutcome;

    /// Clean up after a worker that exited on its own.
    ///
    /// The worker has been reaped, so `target.pid` may already belong to an
    /// unrelated process and must not be signalled. Only leftovers that can
    /// be found another way (by image name) are killed.
    fn sweep_exited(&self, target: &KillTarget) -> KillOutcome;
}

/// Create the platform-appropriate kill strategy.
///
/// On Windows: process-tree kill with a by-name fallback.
/// On Unix: `SIGKILL` to the worker pid.
pub fn create_kill_strategy() -> Box<dyn KillStrategy> {
    #[cfg(windows)]
    {
        Box::new(TreeKill::new(SystemRunner))
    }
    #[cfg(unix)]
    {
        Box::new(SignalKill)
    }
}
