//! End-to-end worker lifecycle against real child processes.
//!
//! A shell script stands in for the bundled server: it is spawned, observed
//! and killed the same way the real worker is.

#![cfg(unix)]

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use blurkit_common::SupervisorError;
use blurkit_supervisor::{
    create_kill_strategy, ExitTrigger, KillOutcome, Supervisor, Termination, WorkerCommand,
    WorkerLayout,
};

fn supervisor() -> Supervisor {
    Supervisor::new(create_kill_strategy()).with_reap_timeout(Duration::from_secs(5))
}

/// A worker that ignores SIGTERM and would otherwise run for a long time.
fn stubborn_worker() -> WorkerCommand {
    WorkerCommand::new("/bin/sh").args(["-c", "trap '' TERM; echo serving; exec sleep 60"])
}

fn process_exists(pid: u32) -> bool {
    // Signal 0 only checks that the pid can be signalled.
    unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
}

fn wait_for_exit(sup: &mut Supervisor, within: Duration) -> Option<blurkit_supervisor::ExitRecord> {
    let deadline = Instant::now() + within;
    while Instant::now() < deadline {
        if let Some(record) = sup.poll() {
            return Some(record);
        }
        thread::sleep(Duration::from_millis(20));
    }
    None
}

#[test]
fn every_exit_trigger_kills_the_worker() {
    for trigger in ExitTrigger::ALL {
        let mut sup = supervisor();
        let pid = sup.start(&stubborn_worker()).unwrap();
        assert!(sup.is_running(), "{trigger}: worker should be running");

        let termination = sup.terminate(trigger);
        assert_eq!(
            termination,
            Termination::Attempted {
                outcome: KillOutcome::Killed,
                reaped: true,
            },
            "{trigger}"
        );
        assert!(!sup.is_running(), "{trigger}: handle should be cleared");
        assert!(sup.pid().is_none());
        assert!(!process_exists(pid), "{trigger}: pid {pid} still exists");

        let record = sup.last_exit().expect("exit recorded");
        assert_eq!(record.pid, pid);
        assert_eq!(record.signal, Some(libc::SIGKILL));
        assert_eq!(record.code, None);
    }
}

#[test]
fn second_terminate_is_a_noop() {
    let mut sup = supervisor();
    sup.start(&stubborn_worker()).unwrap();

    assert!(matches!(
        sup.terminate(ExitTrigger::WindowClosed),
        Termination::Attempted { .. }
    ));
    assert_eq!(sup.terminate(ExitTrigger::AllWindowsClosed), Termination::NoWorker);
    assert_eq!(sup.terminate(ExitTrigger::EventLoopExiting), Termination::NoWorker);
    assert_eq!(sup.terminate(ExitTrigger::HostExit), Termination::NoWorker);
}

#[test]
fn dropping_the_supervisor_kills_the_worker() {
    let mut sup = supervisor();
    let pid = sup.start(&stubborn_worker()).unwrap();
    assert!(process_exists(pid));

    drop(sup);
    assert!(!process_exists(pid));
}

#[test]
fn missing_executable_is_reported_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let host = dir.path().join("blurkit");
    let layout = WorkerLayout::resolve(&host, "BlurkitTool").unwrap();
    assert_eq!(layout.executable, dir.path().join("resources").join("BlurkitTool"));

    let mut sup = supervisor();
    let err = sup.start(&WorkerCommand::new(&layout.executable)).unwrap_err();
    match err {
        SupervisorError::ExecutableNotFound(path) => assert_eq!(path, layout.executable),
        other => panic!("expected ExecutableNotFound, got {other:?}"),
    }
    assert!(!sup.is_running());
    assert_eq!(sup.terminate(ExitTrigger::HostExit), Termination::NoWorker);
}

#[test]
fn self_exit_is_reported_and_not_restarted() {
    let mut sup = supervisor();
    let pid = sup
        .start(&WorkerCommand::new("/bin/sh").args(["-c", "echo starting; exit 3"]))
        .unwrap();

    let record = wait_for_exit(&mut sup, Duration::from_secs(5)).expect("worker exits");
    assert_eq!(record.pid, pid);
    assert_eq!(record.code, Some(3));
    assert!(!record.is_clean());

    // Nothing comes back.
    thread::sleep(Duration::from_millis(200));
    assert!(sup.poll().is_none());
    assert!(!sup.is_running());
    assert!(sup.pid().is_none());
    assert_eq!(sup.last_exit(), Some(&record));

    // The first shutdown path still hands the exited worker to the strategy,
    // which must not signal a pid that has been reaped.
    assert_eq!(
        sup.terminate(ExitTrigger::WindowClosed),
        Termination::AlreadyExited {
            record,
            sweep: KillOutcome::NothingToKill,
        }
    );
    assert_eq!(sup.terminate(ExitTrigger::HostExit), Termination::NoWorker);
}

#[test]
fn second_start_while_running_is_refused() {
    let mut sup = supervisor();
    let pid = sup.start(&stubborn_worker()).unwrap();

    match sup.start(&stubborn_worker()) {
        Err(SupervisorError::AlreadyRunning(running)) => assert_eq!(running, pid),
        other => panic!("expected AlreadyRunning, got {other:?}"),
    }
    assert_eq!(sup.pid(), Some(pid));
    sup.terminate(ExitTrigger::HostExit);
}

#[test]
fn start_after_exit_spawns_a_new_worker() {
    let mut sup = supervisor();
    sup.start(&WorkerCommand::new("/bin/sh").args(["-c", "exit 0"]))
        .unwrap();
    let first = wait_for_exit(&mut sup, Duration::from_secs(5)).expect("worker exits");
    assert!(first.is_clean());

    let pid = sup.start(&stubborn_worker()).unwrap();
    assert_ne!(pid, 0);
    assert!(sup.is_running());
    sup.terminate(ExitTrigger::HostExit);
    assert!(!process_exists(pid));
}

#[test]
fn worker_in_dist_is_started_from_development_layout() {
    let checkout = tempfile::tempdir().unwrap();
    let host: PathBuf = checkout.path().join("target").join("debug").join("blurkit");
    let layout = WorkerLayout::resolve(&host, "BlurkitTool").unwrap();

    let dist = checkout.path().join("dist");
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(&layout.executable, "#!/bin/sh\nexec sleep 60\n").unwrap();
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&layout.executable, std::fs::Permissions::from_mode(0o755))
            .unwrap();
    }

    let command = WorkerCommand::new(&layout.executable).arg("--no-browser");
    let mut sup = supervisor();
    // A freshly written script can briefly fail with ETXTBSY while another
    // test thread forks.
    let mut attempts = 0;
    let pid = loop {
        match sup.start(&command) {
            Ok(pid) => break pid,
            Err(SupervisorError::Spawn { .. }) if attempts < 10 => {
                attempts += 1;
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => panic!("worker failed to start: {e}"),
        }
    };
    assert!(process_exists(pid));
    sup.terminate(ExitTrigger::WindowClosed);
    assert!(!process_exists(pid));
}
