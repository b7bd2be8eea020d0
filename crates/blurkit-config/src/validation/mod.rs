//! Full configuration validation.
//!
//! Validates numeric ranges and required strings. Each check pushes onto a
//! shared error list; all errors are reported in a single `ConfigError`.

mod helpers;


use crate::schema::BlurkitConfig;
use blurkit_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BlurkitConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_window(&mut errors, config);
    validate_worker(&mut errors, config);
    validate_timing(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_window(errors: &mut Vec<String>, config: &BlurkitConfig) {
    validate_range(errors, "window.width", config.window.width, 320, 7680);
    validate_range(errors, "window.height", config.window.height, 240, 4320);
    validate_non_empty(errors, "window.title", &config.window.title);
}

fn validate_worker(errors: &mut Vec<String>, config: &BlurkitConfig) {
    let worker = &config.worker;
    validate_non_empty(errors, "worker.name", &worker.name);

    if worker.name.contains('/') || worker.name.contains('\\') {
        errors.push(format!(
            "worker.name = {:?} must be a file name, not a path",
            worker.name
        ));
    }
}

fn validate_timing(errors: &mut Vec<String>, config: &BlurkitConfig) {
    let r = &config.readiness;
    validate_range(errors, "readiness.timeout_ms", r.timeout_ms, 500, 120_000);
    validate_range(errors, "readiness.interval_ms", r.interval_ms, 50, 5_000);
    validate_range(
        errors,
        "readiness.request_timeout_ms",
        r.request_timeout_ms,
        50,
        10_000,
    );
    validate_range(
        errors,
        "shutdown.reap_timeout_ms",
        config.shutdown.reap_timeout_ms,
        100,
        30_000,
    );
}
