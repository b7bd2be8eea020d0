//! Worker process supervision for the Blurkit shell.
//!
//! Owns the bundled web-server worker end to end:
//! - resolving where the worker executable lives for this run
//! - spawning it and forwarding its output into the log
//! - noticing when it exits
//! - probing its HTTP endpoint until it answers
//! - killing it (and, on Windows, its descendants) on every exit path

pub mod kill;
pub mod layout;
mod output;
pub mod readiness;
pub mod supervisor;
pub mod worker;

pub use kill::{create_kill_strategy, KillOutcome, KillStrategy, KillTarget};
pub use layout::{RunMode, WorkerLayout};
pub use readiness::{wait_until_ready, ReadinessOutcome, ReadinessPolicy, ReadinessProbe};
pub use supervisor::{ExitRecord, ExitTrigger, Supervisor, Termination};
pub use worker::{WorkerCommand, WorkerProcess};

/// `CREATE_NO_WINDOW` process creation flag.
#[cfg(windows)]
pub(crate) const CREATE_NO_WINDOW: u32 = 0x0800_0000;
