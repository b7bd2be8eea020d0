//! Internal types and constants for the app state module.

use std::time::Duration;

/// How often the loop wakes to poll the worker, the probe, and the webview.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Application lifecycle. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum AppPhase {
    NotStarted,
    /// Worker launched (or launch attempted), window not yet navigated.
    Starting,
    /// Window navigated to the worker endpoint.
    Ready,
    Closing,
    Terminated,
}

impl AppPhase {
    /// Move to `next` if it lies ahead. Returns whether the phase changed.
    pub(super) fn advance(&mut self, next: AppPhase) -> bool {
        if next > *self {
            tracing::debug!(from = ?*self, to = ?next, "app phase");
            *self = next;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_move_forward() {
        let mut phase = AppPhase::NotStarted;
        assert!(phase.advance(AppPhase::Starting));
        assert!(phase.advance(AppPhase::Ready));
        assert!(phase.advance(AppPhase::Closing));
        assert!(phase.advance(AppPhase::Terminated));
        assert_eq!(phase, AppPhase::Terminated);
    }

    #[test]
    fn phases_never_move_back() {
        let mut phase = AppPhase::Closing;
        assert!(!phase.advance(AppPhase::Ready));
        assert!(!phase.advance(AppPhase::Closing));
        assert_eq!(phase, AppPhase::Closing);
    }

    #[test]
    fn phases_may_skip_ahead() {
        // A startup failure goes straight from Starting to Closing.
        let mut phase = AppPhase::Starting;
        assert!(phase.advance(AppPhase::Closing));
        assert_eq!(phase, AppPhase::Closing);
    }
}
