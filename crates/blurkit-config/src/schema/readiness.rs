//! Startup readiness and shutdown timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long and how often to probe the worker endpoint before navigating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Total probe budget in milliseconds (valid range: 500-120000).
    pub timeout_ms: u32,
    /// Delay between attempts in milliseconds (valid range: 50-5000).
    pub interval_ms: u32,
    /// Per-request timeout in milliseconds (valid range: 50-10000).
    pub request_timeout_ms: u32,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            interval_ms: 250,
            request_timeout_ms: 1_000,
        }
    }
}

impl ReadinessConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms as u64)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms as u64)
    }
}

/// Worker teardown settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// How long to wait for a killed worker to be reaped, in milliseconds
    /// (valid range: 100-30000).
    pub reap_timeout_ms: u32,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            reap_timeout_ms: 2_000,
        }
    }
}

impl ShutdownConfig {
    pub fn reap_timeout(&self) -> Duration {
        Duration::from_millis(self.reap_timeout_ms as u64)
    }
}
