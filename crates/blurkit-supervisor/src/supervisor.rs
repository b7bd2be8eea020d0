//! The worker lifecycle owner.
//!
//! `Supervisor` holds the single worker slot. All mutation goes through
//! `&mut self`, so the host's event loop is the only writer.
//!
//! Invariants:
//! - at most one live worker at a time (`start` refuses a second one);
//! - `terminate` never fails and never blocks past the reap timeout;
//! - after `terminate` or an observed exit the slot is empty;
//! - a worker that exited on its own is swept once by the strategy (the
//!   first `terminate` after the exit), then `terminate` is a no-op.

use std::process::ExitStatus;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use blurkit_common::SupervisorError;

use crate::kill::{KillOutcome, KillStrategy, KillTarget};
use crate::worker::{WorkerCommand, WorkerProcess};

/// Default time allowed for a killed worker to be reaped.
pub const DEFAULT_REAP_TIMEOUT: Duration = Duration::from_secs(2);

// =============================================================================
// TYPES
// =============================================================================

/// The host shutdown path that requested termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitTrigger {
    /// The main window was closed.
    WindowClosed,
    /// No windows remain open.
    AllWindowsClosed,
    /// The event loop is about to stop.
    EventLoopExiting,
    /// The event loop has returned and the process is about to exit.
    HostExit,
    /// The window could not be created at startup.
    StartupFailed,
    /// The supervisor itself was dropped.
    Dropped,
}

impl ExitTrigger {
    pub const ALL: [ExitTrigger; 6] = [
        ExitTrigger::WindowClosed,
        ExitTrigger::AllWindowsClosed,
        ExitTrigger::EventLoopExiting,
        ExitTrigger::HostExit,
        ExitTrigger::StartupFailed,
        ExitTrigger::Dropped,
    ];
}

impl std::fmt::Display for ExitTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExitTrigger::WindowClosed => "window-closed",
            ExitTrigger::AllWindowsClosed => "all-windows-closed",
            ExitTrigger::EventLoopExiting => "event-loop-exiting",
            ExitTrigger::HostExit => "host-exit",
            ExitTrigger::StartupFailed => "startup-failed",
            ExitTrigger::Dropped => "dropped",
        };
        f.write_str(s)
    }
}

/// The last observed worker exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitRecord {
    pub pid: u32,
    /// Exit code, when the worker exited normally.
    pub code: Option<i32>,
    /// Terminating signal, when the worker was killed by one (Unix only).
    pub signal: Option<i32>,
    pub uptime: Duration,
}

impl ExitRecord {
    fn new(worker: &WorkerProcess, status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            pid: worker.pid(),
            code: status.code(),
            signal,
            uptime: worker.uptime(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.code == Some(0)
    }
}

/// What a `terminate` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// No worker was held.
    NoWorker,
    /// The worker had already exited; only leftovers were swept.
    AlreadyExited {
        record: ExitRecord,
        sweep: KillOutcome,
    },
    /// A kill was attempted.
    Attempted {
        outcome: KillOutcome,
        /// Whether the process was reaped within the timeout.
        reaped: bool,
    },
}

// =============================================================================
// SUPERVISOR
// =============================================================================

pub struct Supervisor {
    strategy: Box<dyn KillStrategy>,
    worker: Option<WorkerProcess>,
    last_exit: Option<ExitRecord>,
    /// Target of a self-exited worker that has not been swept yet.
    unswept: Option<KillTarget>,
    reap_timeout: Duration,
}

impl Supervisor {
    pub fn new(strategy: Box<dyn KillStrategy>) -> Self {
        Self {
            strategy,
            worker: None,
            last_exit: None,
            unswept: None,
            reap_timeout: DEFAULT_REAP_TIMEOUT,
        }
    }

    pub fn with_reap_timeout(mut self, timeout: Duration) -> Self {
        self.reap_timeout = timeout;
        self
    }

    /// Spawn the worker.
    ///
    /// Failures are logged here and returned; the slot stays empty.
    pub fn start(&mut self, command: &WorkerCommand) -> Result<u32, SupervisorError> {
        // Pick up an exit that has not been polled yet before refusing.
        self.poll();
        if let Some(worker) = &self.worker {
            let err = SupervisorError::AlreadyRunning(worker.pid());
            warn!(error = %err, "refusing to start a second worker");
            return Err(err);
        }

        match WorkerProcess::spawn(command) {
            Ok(worker) => {
                let pid = worker.pid();
                // A by-name sweep would now hit the new worker.
                self.unswept = None;
                self.worker = Some(worker);
                Ok(pid)
            }
            Err(e) => {
                error!(error = %e, "worker failed to start");
                Err(e)
            }
        }
    }

    /// Check whether the worker has exited. Never blocks.
    ///
    /// On exit the code is logged, the slot is cleared, and the record is
    /// returned. Nothing is restarted; the next `terminate` sweeps leftovers.
    pub fn poll(&mut self) -> Option<ExitRecord> {
        let worker = self.worker.as_mut()?;

        let status = match worker.try_exit() {
            Ok(Some(status)) => status,
            Ok(None) => return None,
            Err(e) => {
                warn!(pid = worker.pid(), error = %e, "failed to check worker state");
                return None;
            }
        };

        let worker = self.worker.take()?;
        let record = ExitRecord::new(&worker, status);
        log_exit(&record);
        self.unswept = Some(target_of(&worker));
        self.last_exit = Some(record.clone());
        Some(record)
    }

    /// Forcefully terminate the worker, if one is held.
    ///
    /// Never returns an error: every failure is logged. The slot is cleared
    /// whatever the outcome.
    pub fn terminate(&mut self, trigger: ExitTrigger) -> Termination {
        let Some(mut worker) = self.worker.take() else {
            if let (Some(target), Some(record)) = (self.unswept.take(), self.last_exit.clone()) {
                return self.sweep(trigger, &target, record);
            }
            debug!(%trigger, "terminate: no worker held");
            return Termination::NoWorker;
        };

        let target = target_of(&worker);
        if let Ok(Some(status)) = worker.try_exit() {
            let record = ExitRecord::new(&worker, status);
            log_exit(&record);
            self.last_exit = Some(record.clone());
            return self.sweep(trigger, &target, record);
        }

        info!(
            %trigger,
            pid = target.pid,
            strategy = self.strategy.name(),
            "terminating worker"
        );

        let outcome = self.strategy.kill(&target);
        match &outcome {
            KillOutcome::Killed => debug!(pid = target.pid, "worker killed"),
            KillOutcome::KilledByName => {
                info!(pid = target.pid, image = %target.image_name, "worker killed by name")
            }
            KillOutcome::NothingToKill => debug!(pid = target.pid, "nothing to kill"),
            KillOutcome::Failed(reason) => {
                error!(pid = target.pid, %reason, "worker termination failed")
            }
        }

        let reaped = match worker.reap(self.reap_timeout) {
            Some(status) => {
                let record = ExitRecord::new(&worker, status);
                log_exit(&record);
                self.last_exit = Some(record);
                true
            }
            None => {
                warn!(
                    pid = target.pid,
                    timeout_ms = self.reap_timeout.as_millis() as u64,
                    "worker not reaped in time; abandoning handle"
                );
                false
            }
        };

        Termination::Attempted { outcome, reaped }
    }

    /// Let the strategy clean up after a worker that exited on its own.
    fn sweep(
        &self,
        trigger: ExitTrigger,
        target: &KillTarget,
        record: ExitRecord,
    ) -> Termination {
        info!(
            %trigger,
            pid = target.pid,
            strategy = self.strategy.name(),
            "worker already exited; sweeping leftovers"
        );
        let sweep = self.strategy.sweep_exited(target);
        match &sweep {
            KillOutcome::Failed(reason) => {
                warn!(image = %target.image_name, %reason, "leftover sweep failed")
            }
            KillOutcome::KilledByName => {
                info!(image = %target.image_name, "leftover worker processes killed by name")
            }
            KillOutcome::Killed | KillOutcome::NothingToKill => {}
        }
        Termination::AlreadyExited { record, sweep }
    }

    /// Whether a worker handle is held and no exit has been observed.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(WorkerProcess::is_alive)
    }

    pub fn pid(&self) -> Option<u32> {
        self.worker.as_ref().map(WorkerProcess::pid)
    }

    /// What a kill of the current worker would target.
    pub fn kill_target(&self) -> Option<KillTarget> {
        self.worker.as_ref().map(target_of)
    }

    pub fn last_exit(&self) -> Option<&ExitRecord> {
        self.last_exit.as_ref()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.terminate(ExitTrigger::Dropped);
    }
}

fn target_of(worker: &WorkerProcess) -> KillTarget {
    KillTarget {
        pid: worker.pid(),
        image_name: worker.image_name(),
    }
}

fn log_exit(record: &ExitRecord) {
    let uptime_ms = record.uptime.as_millis() as u64;
    if record.is_clean() {
        info!(pid = record.pid, code = 0, uptime_ms, "worker exited");
    } else {
        warn!(
            pid = record.pid,
            code = ?record.code,
            signal = ?record.signal,
            uptime_ms,
            "worker exited"
        );
    }
}

// =============================================================================
// TESTS
// =============================================================================
