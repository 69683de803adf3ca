//! # Types Module
//!
//! Core data structures produced by the report parsers and consumed by the scorer.

/// Aggregate pass/fail counts taken from a test run's results report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverallResults {
    /// Number of assertions that passed.
    pub successes: u64,
    /// Number of assertions that failed.
    pub failures: u64,
}

impl OverallResults {
    pub fn new(successes: u64, failures: u64) -> Self {
        Self {
            successes,
            failures,
        }
    }

    /// Number of assertions the report accounts for, or `None` if it does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.successes.checked_add(self.failures)
    }
}
