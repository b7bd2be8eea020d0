//! HTTP readiness probe for the worker endpoint.
//!
//! The worker binds its port some time after spawn. The probe issues `GET`
//! requests until anything answers or the deadline passes. Any HTTP
//! response counts, whatever its status: a 404 or 500 still proves the
//! server is listening.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

/// How long and how often to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Overall deadline.
    pub timeout: Duration,
    /// Delay between failed attempts.
    pub interval: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            interval: Duration::from_millis(250),
            request_timeout: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessOutcome {
    /// The endpoint answered.
    Ready { attempts: u32, elapsed: Duration },
    /// Nothing answered before the deadline.
    TimedOut { attempts: u32, elapsed: Duration },
    /// The probe could not run at all (HTTP client construction failed).
    ProbeFailed(String),
}

impl ReadinessOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ReadinessOutcome::Ready { .. })
    }
}

/// Probe `url` until it answers or `policy.timeout` elapses.
pub async fn wait_until_ready(url: &str, policy: &ReadinessPolicy) -> ReadinessOutcome {
    let client = match reqwest::Client::builder()
        .timeout(policy.request_timeout)
        .no_proxy()
        .build()
    {
        Ok(client) => client,
        Err(e) => return ReadinessOutcome::ProbeFailed(e.to_string()),
    };

    let started = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match client.get(url).send().await {
            Ok(response) => {
                let elapsed = started.elapsed();
                debug!(
                    url,
                    status = response.status().as_u16(),
                    attempts,
                    "readiness probe answered"
                );
                return ReadinessOutcome::Ready { attempts, elapsed };
            }
            Err(e) => debug!(url, attempts, error = %e, "worker not answering yet"),
        }

        let elapsed = started.elapsed();
        if elapsed + policy.interval > policy.timeout {
            return ReadinessOutcome::TimedOut { attempts, elapsed };
        }
        tokio::time::sleep(policy.interval).await;
    }
}

// =============================================================================
// BACKGROUND PROBE
// =============================================================================

/// A readiness probe running on a tokio runtime.
///
/// The outcome arrives over a std channel so a synchronous event loop can
/// poll it without blocking. Dropping the probe cancels it.
pub struct ReadinessProbe {
    rx: mpsc::Receiver<ReadinessOutcome>,
    task: tokio::task::JoinHandle<()>,
}

impl ReadinessProbe {
    pub fn spawn(runtime: &tokio::runtime::Handle, url: String, policy: ReadinessPolicy) -> Self {
        let (tx, rx) = mpsc::channel();
        let task = runtime.spawn(async move {
            info!(url = %url, timeout_ms = policy.timeout.as_millis() as u64, "probing worker endpoint");
            let outcome = wait_until_ready(&url, &policy).await;
            match &outcome {
                ReadinessOutcome::Ready { attempts, elapsed } => info!(
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "worker endpoint ready"
                ),
                ReadinessOutcome::TimedOut { attempts, elapsed } => warn!(
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "worker endpoint did not answer in time"
                ),
                ReadinessOutcome::ProbeFailed(reason) => {
                    warn!(%reason, "readiness probe could not run")
                }
            }
            // Receiver gone means the host stopped caring.
            let _ = tx.send(outcome);
        });
        Self { rx, task }
    }

    /// Non-blocking check for the outcome. Returns it at most once.
    pub fn try_outcome(&self) -> Option<ReadinessOutcome> {
        self.rx.try_recv().ok()
    }

    pub fn abort(&self) {
        self.task.abort();
    }

}

impl Drop for ReadinessProbe {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// =============================================================================
// TESTS
// =============================================================================
