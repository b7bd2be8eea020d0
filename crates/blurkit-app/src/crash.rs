//! Panic handling.
//!
//! Release builds abort on panic, so `Drop` never runs and the worker would
//! outlive the host. The panic hook kills the armed worker before printing
//! the crash banner.

use std::sync::Mutex;

use blurkit_supervisor::{create_kill_strategy, KillTarget};

static ARMED_WORKER: Mutex<Option<KillTarget>> = Mutex::new(None);

/// Remember the live worker so a panic can still kill it.
pub fn arm(target: KillTarget) {
    if let Ok(mut slot) = ARMED_WORKER.lock() {
        *slot = Some(target);
    }
}

/// Forget the worker once it has exited or been terminated.
pub fn disarm() {
    if let Ok(mut slot) = ARMED_WORKER.lock() {
        *slot = None;
    }
}

fn take_armed() -> Option<KillTarget> {
    // A panic while the lock is held must not stop the kill.
    match ARMED_WORKER.lock() {
        Ok(mut slot) => slot.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let killed = take_armed().map(|target| {
            let outcome = create_kill_strategy().kill(&target);
            (target.pid, outcome)
        });

        eprintln!("\n--- BlurkitTool crashed ---");
        if let Some((pid, outcome)) = killed {
            eprintln!("Worker process {pid} terminated: {outcome:?}");
        }
        eprintln!("Run with RUST_LOG=blurkit=debug for more detail.");
        eprintln!("---------------------------\n");

        default_hook(info);
    }));
}
