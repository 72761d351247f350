//! Bounded manual retry.

use super::resource::Refetch;
use crate::constants::retry::MAX_ATTEMPTS;

/// What a retry action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// The target was asked to refetch; `remaining` retries are left afterwards.
    Retried { remaining: u32 },
    /// Retries are exhausted; the owner should reset its whole search.
    ResetRequested,
}

/// Counts user-initiated retries for one subject.
///
/// Failures never advance the counter; only [`RetryController::on_retry_or_reset`]
/// does. The owner calls [`RetryController::reset`] whenever the subject changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryController {
    attempts: u32,
    max: u32,
    reset_label: &'static str,
}

impl RetryController {
    pub fn new(max: u32, reset_label: &'static str) -> Self {
        Self {
            attempts: 0,
            max,
            reset_label,
        }
    }

    /// Default bound with the given label for the exhausted state.
    pub fn with_reset_label(reset_label: &'static str) -> Self {
        Self::new(MAX_ATTEMPTS, reset_label)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.attempts)
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max
    }

    /// Refetches `target` while retries remain, otherwise asks for a reset.
    pub fn on_retry_or_reset(&mut self, target: &impl Refetch) -> RetryOutcome {
        if self.is_exhausted() {
            return RetryOutcome::ResetRequested;
        }
        target.refetch();
        self.attempts += 1;
        RetryOutcome::Retried {
            remaining: self.remaining(),
        }
    }

    /// Button text: `Retry (N of M left)` or the reset label once exhausted.
    pub fn label(&self) -> String {
        if self.is_exhausted() {
            self.reset_label.to_string()
        } else {
            format!("Retry ({} of {} left)", self.remaining(), self.max)
        }
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingTarget {
        refetches: Cell<u32>,
    }

    impl Refetch for CountingTarget {
        fn refetch(&self) {
            self.refetches.set(self.refetches.get() + 1);
        }
    }

    #[test]
    fn test_retries_until_exhausted_then_requests_reset() {
        let target = CountingTarget::default();
        let mut retry = RetryController::with_reset_label("Search again");

        assert_eq!(retry.label(), "Retry (3 of 3 left)");
        assert_eq!(
            retry.on_retry_or_reset(&target),
            RetryOutcome::Retried { remaining: 2 }
        );
        assert_eq!(retry.label(), "Retry (2 of 3 left)");
        retry.on_retry_or_reset(&target);
        assert_eq!(
            retry.on_retry_or_reset(&target),
            RetryOutcome::Retried { remaining: 0 }
        );
        assert_eq!(retry.label(), "Search again");

        assert_eq!(retry.on_retry_or_reset(&target), RetryOutcome::ResetRequested);
        assert_eq!(target.refetches.get(), 3);
        assert_eq!(retry.attempts(), 3);
    }

    #[test]
    fn test_reset_restores_full_budget() {
        let target = CountingTarget::default();
        let mut retry = RetryController::new(1, "Reset search");

        retry.on_retry_or_reset(&target);
        assert!(retry.is_exhausted());
        retry.reset();

        assert_eq!(retry.remaining(), 1);
        assert_eq!(retry.label(), "Retry (1 of 1 left)");
    }

    #[test]
    fn test_zero_max_resets_immediately() {
        let target = CountingTarget::default();
        let mut retry = RetryController::new(0, "Reset search");

        assert_eq!(retry.on_retry_or_reset(&target), RetryOutcome::ResetRequested);
        assert_eq!(target.refetches.get(), 0);
    }
}
