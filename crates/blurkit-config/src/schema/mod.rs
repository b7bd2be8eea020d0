//! Configuration schema types for Blurkit.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the shell's built-in behavior.

mod readiness;
mod system;
mod window;
mod worker;

pub use readiness::*;
pub use system::*;
pub use window::*;
pub use worker::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Blurkit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct BlurkitConfig {
    pub window: WindowConfig,
    pub worker: WorkerConfig,
    pub readiness: ReadinessConfig,
    pub shutdown: ShutdownConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
