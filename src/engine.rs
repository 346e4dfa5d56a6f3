//! Recognition and resolution engine.
//!
//! Parsing an input string is a short pipeline:
//!
//! ```text
//! input ── Scanner::scan ──────────────┐        (scanner.rs)
//!          - date-shape trie walk       │
//!          - month-name trie walk       │
//!          - time-shape trie walk       v
//!                              Vec<Fragment>
//!                                       │
//!          resolve_date ────────────────┤        (resolve.rs)
//!          - token ordering heuristics  │
//!          - calendar validation        │
//!          attach standalone times ─────┤        (engine.rs)
//!          resolve_time ────────────────┤        (time.rs)
//!          identified_format ───────────┤        (format.rs)
//!                                       v
//!                           Vec<LocalDateModel>
//! ```
//!
//! Fragments that fail resolution are dropped silently; the `tracing` debug
//! events say why.

#[path = "engine/format.rs"]
mod format;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/scanner.rs"]
mod scanner;
#[path = "engine/time.rs"]
mod time;


pub use metrics::{FragmentOutcome, RunMetrics, RunResult};

use crate::api::{FragmentKind, LocalDateModel, Options};
use crate::{DateElement, Fragment, TimePiece};
use resolve::{ResolvedDate, resolve_date};
use scanner::Scanner;
use std::time::Instant;

/// A resolved date waiting for its time and format string.
struct Candidate<'e> {
    /// Position of the source fragment in scanner order.
    order: usize,
    element: &'e DateElement,
    date: ResolvedDate,
    /// A standalone time assigned to this date, with its fragment position.
    borrowed_time: Option<(usize, &'e TimePiece)>,
}

impl Candidate<'_> {
    fn has_time(&self) -> bool {
        self.element.time.is_some() || self.borrowed_time.is_some()
    }
}

/// Runs the scanner and resolvers over one input.
///
/// Usage: `Parser::new(input, &options).run()`.
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    options: &'a Options,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &'a Options) -> Self {
        Parser { input, options }
    }

    /// Scan, resolve and format, returning results with stage timings.
    pub fn run_with_metrics(self) -> RunResult {
        let total_start = Instant::now();

        let scan_start = Instant::now();
        let fragments = Scanner::new(self.input).scan();
        let scan = scan_start.elapsed();

        let resolve_start = Instant::now();
        let mut outcomes: Vec<FragmentOutcome> = fragments.iter().map(|f| self.outcome(f)).collect();

        let mut candidates: Vec<Candidate> = Vec::new();
        for (order, fragment) in fragments.iter().enumerate() {
            if let Fragment::Date(element) = fragment {
                match resolve_date(element) {
                    Some(date) => candidates.push(Candidate { order, element, date, borrowed_time: None }),
                    None => tracing::debug!(text = %element.text, "date fragment did not resolve"),
                }
            }
        }

        if self.options.attach_standalone_times {
            self.attach_standalone_times(&fragments, &mut candidates);
        }

        let mut models = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            outcomes[candidate.order].resolved = true;
            if let Some((order, _)) = candidate.borrowed_time {
                outcomes[order].resolved = true;
            }
            models.push(self.build_model(candidate));
        }
        let resolve = resolve_start.elapsed();

        RunResult { fragments: outcomes, models, metrics: RunMetrics { total: total_start.elapsed(), scan, resolve } }
    }

    /// Scan, resolve and format.
    pub fn run(self) -> Vec<LocalDateModel> {
        self.run_with_metrics().models
    }

    /// Give each standalone time to the next date without a time, or failing
    /// that to the closest earlier one.
    fn attach_standalone_times<'e>(&self, fragments: &'e [Fragment], candidates: &mut [Candidate<'e>]) {
        for (order, fragment) in fragments.iter().enumerate() {
            let Fragment::Time(piece) = fragment else {
                continue;
            };

            let target = candidates
                .iter()
                .position(|c| c.order > order && !c.has_time())
                .or_else(|| candidates.iter().rposition(|c| c.order < order && !c.has_time()));

            match target {
                Some(idx) => {
                    tracing::debug!(time = %piece.text, date = %candidates[idx].element.text, "attaching standalone time");
                    candidates[idx].borrowed_time = Some((order, piece));
                }
                None => tracing::debug!(time = %piece.text, "standalone time has no date to join"),
            }
        }
    }

    fn build_model(&self, candidate: &Candidate) -> LocalDateModel {
        let element = candidate.element;
        let date = &candidate.date;

        let mut date_time_string = date.canonical();
        let mut canonical_format = resolve::CANONICAL_DATE_FORMAT.to_string();
        let mut format_tag = date.format_tag.clone();
        let mut time_value = None;
        let mut has_am_pm = false;

        let piece = element.time.as_ref().or(candidate.borrowed_time.map(|(_, piece)| piece));
        if let Some(piece) = piece {
            match time::resolve_time(piece) {
                Some(resolved) => {
                    date_time_string.push(' ');
                    date_time_string.push_str(&resolved.canonical());
                    canonical_format.push(' ');
                    canonical_format.push_str(&resolved.format_tag());
                    format_tag.push_str(&time::separator_token(piece.separator));
                    format_tag.push_str(&resolved.format_tag());
                    has_am_pm = piece.has_am_pm;
                    time_value = Some(resolved.time);
                }
                None => tracing::debug!(time = %piece.text, "time out of range, keeping date only"),
            }
        }

        let identified_date_format = format::identified_format(element, &format_tag, has_am_pm, self.options);
        // A rejected attached time stays out of the reported span.
        let range = if element.time.is_some() && time_value.is_none() { element.range } else { element.full_range() };

        LocalDateModel {
            original_text: self.input[range.start..range.end].to_string(),
            date_time_string,
            canonical_format,
            identified_date_format,
            start: range.start,
            end: range.end,
            year: date.year,
            month: date.month,
            day: date.day,
            time: time_value,
        }
    }

    fn outcome(&self, fragment: &Fragment) -> FragmentOutcome {
        let range = fragment.range();
        let kind = match fragment {
            Fragment::Date(_) => FragmentKind::Date,
            Fragment::Time(_) => FragmentKind::Time,
        };
        FragmentOutcome {
            kind,
            text: self.input[range.start..range.end].to_string(),
            start: range.start,
            end: range.end,
            resolved: false,
        }
    }
}
