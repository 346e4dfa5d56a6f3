//! Engine run metrics.
//!
//! - `Parser::run` for normal operation.
//! - `Parser::run_with_metrics` for profiling and for inspecting which
//!   fragments the scanner found and which of them resolved.

use crate::api::{FragmentKind, LocalDateModel};
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Parser::run_with_metrics`](super::Parser::run_with_metrics).
    pub total: Duration,
    /// Time spent in the scanner.
    pub scan: Duration,
    /// Time spent resolving fragments and building results.
    pub resolve: Duration,
}

/// What happened to one scanner fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentOutcome {
    pub kind: FragmentKind,
    /// Slice of the input covered by the fragment.
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Whether the fragment contributed to a result.
    pub resolved: bool,
}

/// Parser output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Every fragment in scanner order.
    pub fragments: Vec<FragmentOutcome>,
    pub models: Vec<LocalDateModel>,
    pub metrics: RunMetrics,
}
