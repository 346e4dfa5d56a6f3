//! Format-free date and time extraction.
//!
//! ```
//! let found = datetrie::parse("Shipped 12/12/2025, delivered 2025-12-14T09:30:00.");
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[0].date_time_string, "2025-12-12");
//! assert_eq!(found[0].identified_date_format, "MM/dd/yyyy");
//! assert_eq!(found[1].date_time_string, "2025-12-14 09:30:00");
//! ```

#[macro_use]
mod macros;
mod api;
mod classify;
mod engine;
mod trie;
mod vocab;

pub use api::{
    FragmentKind, FragmentSummary, LocalDateModel, Options, ParseReport, parse, parse_verbose_with, parse_with,
};
pub use classify::{LiteralKind, classify_literal};
pub use trie::{NodeId, Trie, TrieNode};
pub use vocab::{
    DATE_SHAPES, MONTH_FULL, MONTH_SHORT, TIME_SHAPES, Vocabulary, WEEKDAY_FULL, WEEKDAY_SHORT, vocabulary,
};

// --- Internal types ---------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// A time-shaped run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TimePiece {
    /// Matched text, trimmed; includes a trailing ` am`/` pm` when present.
    pub text: String,
    pub range: Range,
    pub has_am_pm: bool,
    /// Character between the date and this time (`' '` for standalone times).
    pub separator: char,
}

/// A date-shaped run of text produced by the scanner.
///
/// ```text
/// "due 12 Dec 2025 10:15:30 pm"
///      └────┬────┘ └────┬─────┘
///        text        time (TimePiece)
///      └───────── range ─────────┘ (date range + time range)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DateElement {
    /// Date text with runs of spaces collapsed to one.
    pub text: String,
    /// Span of the date part only.
    pub range: Range,
    /// Whether a month name was consumed.
    pub alphanumeric: bool,
    /// Time directly following the date.
    pub time: Option<TimePiece>,
}

impl DateElement {
    /// Span of the date plus any directly attached time.
    pub fn full_range(&self) -> Range {
        match &self.time {
            Some(time) => Range { start: self.range.start, end: time.range.end },
            None => self.range,
        }
    }
}

/// Scanner output, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fragment {
    Date(DateElement),
    /// A time with no date directly before it.
    Time(TimePiece),
}

impl Fragment {
    pub fn range(&self) -> Range {
        match self {
            Fragment::Date(element) => element.full_range(),
            Fragment::Time(piece) => piece.range,
        }
    }
}
