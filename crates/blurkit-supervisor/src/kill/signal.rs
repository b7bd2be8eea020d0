//! Unix termination: `SIGKILL` to the worker pid.

use super::{KillOutcome, KillStrategy, KillTarget};

/// Delivers `SIGKILL`, which the worker cannot catch, block, or delay.
pub struct SignalKill;

impl KillStrategy for SignalKill {
    fn name(&self) -> &'static str {
        "sigkill"
    }

    fn kill(&self, target: &KillTarget) -> KillOutcome {
        let pid = match libc::pid_t::try_from(target.pid) {
            Ok(pid) if pid > 0 => pid,
            _ => return KillOutcome::Failed(format!("invalid pid {}", target.pid)),
        };

        // SAFETY: kill(2) with a positive pid signals exactly that process.
        // The supervisor has not reaped it yet, so the pid cannot be reused.
        let rc = unsafe { libc::kill(pid, libc::SIGKILL) };
        if rc == 0 {
            KillOutcome::Killed
        } else {
            let err = std::io::Error::last_os_error();
            KillOutcome::Failed(format!("kill({pid}, SIGKILL) failed: {err}"))
        }
    }

    /// A reaped pid can be reused, and `SIGKILL` to the pid never reached
    /// descendants anyway, so there is nothing safe to do here.
    fn sweep_exited(&self, _target: &KillTarget) -> KillOutcome {
        KillOutcome::NothingToKill
    }
}
