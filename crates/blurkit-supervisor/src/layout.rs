//! Worker executable location.
//!
//! The worker ships in one of two places depending on how the shell was
//! launched:
//!
//! - Development: `cargo run` from a checkout. The host binary lives under
//!   `<checkout>/target/...` and the worker is expected at
//!   `<checkout>/dist/<worker>`.
//! - Packaged: an installed build. The worker sits in the resources
//!   directory next to the host (`<App>.app/Contents/Resources/` inside a
//!   macOS bundle, `<exe dir>/resources/` everywhere else).
//!
//! Resolution is a pure function of the host executable path, so it is
//! deterministic for a given run.
//!
//! Development mode is recognised only by a directory literally named
//! `target` within three levels above the binary's directory. A build with
//! a custom `CARGO_TARGET_DIR` (say `/tmp/build/debug/blurkit`) is taken for
//! a packaged install and looks in `<exe dir>/resources/`; copy or link the
//! worker there, or build into a directory named `target`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use blurkit_common::SupervisorError;

// =============================================================================
// RUN MODE
// =============================================================================

/// How the host application is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Running from a raw checkout (inside a cargo `target` directory).
    Development,
    /// Running from a built/installed distribution.
    Packaged,
}

impl RunMode {
    /// Detect the run mode from the host executable path.
    pub fn detect(current_exe: &Path) -> Self {
        if checkout_root(current_exe).is_some() {
            RunMode::Development
        } else {
            RunMode::Packaged
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Development => f.write_str("development"),
            RunMode::Packaged => f.write_str("packaged"),
        }
    }
}

/// Find the checkout root for a binary built by cargo.
///
/// Cargo places binaries at `target/<profile>/`, `target/<triple>/<profile>/`,
/// and test harnesses one level deeper in `deps/`, so only the nearest three
/// ancestors above the executable's directory are considered.
fn checkout_root(current_exe: &Path) -> Option<&Path> {
    current_exe
        .parent()?
        .ancestors()
        .skip(1)
        .take(3)
        .find(|dir| dir.file_name() == Some(OsStr::new("target")))
        .and_then(Path::parent)
}

/// Resources directory of a packaged install.
fn resources_dir(current_exe: &Path) -> Option<PathBuf> {
    let exe_dir = current_exe.parent()?;

    // <App>.app/Contents/MacOS/<exe> -> <App>.app/Contents/Resources
    if exe_dir.file_name() == Some(OsStr::new("MacOS")) {
        if let Some(contents) = exe_dir.parent() {
            if contents.file_name() == Some(OsStr::new("Contents")) {
                return Some(contents.join("Resources"));
            }
        }
    }

    Some(exe_dir.join("resources"))
}

// =============================================================================
// WORKER LAYOUT
// =============================================================================

/// Where the worker executable lives for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerLayout {
    pub mode: RunMode,
    pub executable: PathBuf,
}

impl WorkerLayout {
    /// Resolve the worker path for a host executable at `current_exe`.
    pub fn resolve(current_exe: &Path, worker_name: &str) -> Result<Self, SupervisorError> {
        let file_name = Self::executable_file_name(worker_name);
        let mode = RunMode::detect(current_exe);

        let executable = match mode {
            RunMode::Development => checkout_root(current_exe)
                .map(|root| root.join("dist").join(&file_name)),
            RunMode::Packaged => resources_dir(current_exe).map(|dir| dir.join(&file_name)),
        }
        .ok_or_else(|| {
            SupervisorError::Layout(format!(
                "host executable {} has no parent directory",
                current_exe.display()
            ))
        })?;

        Ok(Self { mode, executable })
    }

    /// Resolve the worker path for the running host binary.
    pub fn current(worker_name: &str) -> Result<Self, SupervisorError> {
        let exe = std::env::current_exe().map_err(|e| {
            SupervisorError::Layout(format!("could not determine host executable: {e}"))
        })?;
        Self::resolve(&exe, worker_name)
    }

    /// Platform file name for a worker base name (`.exe` on Windows).
    pub fn executable_file_name(worker_name: &str) -> String {
        format!("{worker_name}{}", std::env::consts::EXE_SUFFIX)
    }
}

// =============================================================================
// TESTS
// =============================================================================
