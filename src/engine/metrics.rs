//! Evaluation metrics.
//!
//! Opt-in counters and timings for a single message. The plain
//! `evaluate` / `check` paths do not collect them.

use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EvalMetrics {
    /// Time spent running matchers.
    pub matching: Duration,
    /// Time spent folding matches into an outcome.
    pub resolve: Duration,
    /// Wall time for the whole check.
    pub total: Duration,
    /// Enabled, valid phrases that were run against the message.
    pub rules_considered: usize,
    pub skipped_disabled: usize,
    pub skipped_invalid: usize,
    pub matched: usize,
}
