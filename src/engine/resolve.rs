//! Date resolution.
//!
//! Turns the text of a [`DateElement`] into a validated calendar date plus a
//! format tag describing the field order. The tag uses two placeholders for
//! the delimiters, filled in later from the source text:
//!
//! ```text
//! "12/31/2025"   ->  2025-12-31   "MM$dd&yyyy"
//! "2025.31.12"   ->  2025-12-31   "yyyy$dd&MM"
//! "12 Dec 99"    ->  0099-12-12   "dd$MMM&yy"
//! ```
//!
//! Anything that cannot be ordered or fails the calendar check resolves to
//! `None`.

use crate::DateElement;
use crate::classify::{LiteralKind, classify_literal};
use crate::vocab::month_number;

/// Format tag of [`ResolvedDate::canonical`].
pub(crate) const CANONICAL_DATE_FORMAT: &str = "yyyy-MM-dd";

/// Largest value still read as a day of month.
const MAX_DAY_TOKEN: u32 = 31;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedDate {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    /// Layout with `$` and `&` standing in for the delimiters.
    pub format_tag: String,
}

impl ResolvedDate {
    /// `YYYY-MM-DD`, zero padded.
    pub fn canonical(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Where the year sits among the three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearPosition {
    First,
    Last,
}

pub(crate) fn resolve_date(element: &DateElement) -> Option<ResolvedDate> {
    let tokens: Vec<&str> = regex!(r"[-.\\/|:, ]+").split(&element.text).filter(|t| !t.is_empty()).collect();
    if tokens.len() < 3 {
        return None;
    }

    let resolved = if element.alphanumeric {
        resolve_named(tokens[0], tokens[1], tokens[2])
    } else {
        resolve_numeric(&element.text, tokens[0], tokens[1], tokens[2])
    };

    if let Some(date) = &resolved {
        tracing::trace!(text = %element.text, date = %date.canonical(), tag = %date.format_tag, "date resolved");
    }
    resolved
}

fn numeral(token: &str) -> Option<u32> {
    if classify_literal(token).is_numeral() { token.parse().ok() } else { None }
}

fn month_literal(token: &str) -> Option<u32> {
    if classify_literal(token) == LiteralKind::Month { month_number(token) } else { None }
}

fn year_token(year: u32) -> &'static str {
    if year < 100 { "yy" } else { "yyyy" }
}

/// Dates written with a month name: `12 Dec 2025`, `Dec 12, 2025`,
/// `2025 Dec 12` or `2025-12-Dec`.
fn resolve_named(t1: &str, t2: &str, t3: &str) -> Option<ResolvedDate> {
    let year_first = || -> Option<ResolvedDate> {
        let year = numeral(t1).filter(|&y| y > MAX_DAY_TOKEN)?;
        let y = year_token(year);
        match numeral(t2) {
            Some(day) => build(year, month_literal(t3)?, day, format!("{y}$dd&MMM")),
            None => build(year, month_literal(t2)?, numeral(t3)?, format!("{y}$MMM&dd")),
        }
    };

    let year_last = || -> Option<ResolvedDate> {
        let year = numeral(t3).filter(|&y| y > MAX_DAY_TOKEN)?;
        let y = year_token(year);
        match numeral(t1) {
            Some(day) => build(year, month_literal(t2)?, day, format!("dd$MMM&{y}")),
            None => build(year, month_literal(t1)?, numeral(t2)?, format!("MMM$dd&{y}")),
        }
    };

    year_first().or_else(year_last)
}

/// All-digit dates. The first branch whose condition holds decides the result.
fn resolve_numeric(text: &str, t1: &str, t2: &str, t3: &str) -> Option<ResolvedDate> {
    // `T` and `_` separate a date from a time, never two date fields.
    if text.contains(['T', '_']) {
        return None;
    }

    let d1: u32 = t1.parse().ok()?;
    let d2: u32 = t2.parse().ok()?;
    let d3: u32 = t3.parse().ok()?;

    let day_like = |v: u32| (1..=MAX_DAY_TOKEN).contains(&v);
    let two_digit_year = |v: u32| (MAX_DAY_TOKEN + 1..100).contains(&v);

    if d1 > 999 || two_digit_year(d1) {
        assign(d1, d2, d3, YearPosition::First)
    } else if d3 > 999 && (day_like(d1) || day_like(d2)) && d1 > 0 && d2 > 0 {
        assign(d3, d1, d2, YearPosition::Last)
    } else if two_digit_year(d3) && (day_like(d1) || day_like(d2)) {
        assign(d3, d1, d2, YearPosition::Last)
    } else {
        None
    }
}

/// Decide which of `a` and `b` (in text order) is the month.
fn assign(year: u32, a: u32, b: u32, position: YearPosition) -> Option<ResolvedDate> {
    let (month, day, fields) = if (1..=12).contains(&a) {
        (a, b, ["MM", "dd"])
    } else if a > 12 && b <= 12 {
        (b, a, ["dd", "MM"])
    } else {
        return None;
    };

    let y = year_token(year);
    let tag = match position {
        YearPosition::First => format!("{y}${}&{}", fields[0], fields[1]),
        YearPosition::Last => format!("{}${}&{y}", fields[0], fields[1]),
    };
    build(year, month, day, tag)
}

fn build(year: u32, month: u32, day: u32, format_tag: String) -> Option<ResolvedDate> {
    if day == 0 || day > days_in_month(year, month)? {
        tracing::trace!(year, month, day, "day out of range");
        return None;
    }
    Some(ResolvedDate { year, month, day, format_tag })
}

/// Month length; every fourth year is a leap year, centuries included.
fn days_in_month(year: u32, month: u32) -> Option<u32> {
    match month {
        2 if year % 4 == 0 => Some(29),
        2 => Some(28),
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Range;

    fn element(text: &str, alphanumeric: bool) -> DateElement {
        DateElement { text: text.to_string(), range: Range { start: 0, end: text.len() }, alphanumeric, time: None }
    }

    fn numeric(text: &str) -> Option<(String, String)> {
        resolve_date(&element(text, false)).map(|d| (d.canonical(), d.format_tag))
    }

    fn named(text: &str) -> Option<(String, String)> {
        resolve_date(&element(text, true)).map(|d| (d.canonical(), d.format_tag))
    }

    fn ok(date: &str, tag: &str) -> Option<(String, String)> {
        Some((date.to_string(), tag.to_string()))
    }

    #[test]
    fn numeric_orderings() {
        let cases = [
            ("2025-12-12", ok("2025-12-12", "yyyy$MM&dd")),
            ("2025.31.12", ok("2025-12-31", "yyyy$dd&MM")),
            ("12/12/2025", ok("2025-12-12", "MM$dd&yyyy")),
            ("31/12/2025", ok("2025-12-31", "dd$MM&yyyy")),
            ("1/2/2025", ok("2025-01-02", "MM$dd&yyyy")),
            ("99-01-02", ok("0099-01-02", "yy$MM&dd")),
            ("01.02.99", ok("0099-01-02", "MM$dd&yy")),
            ("13/13/2025", None),
            ("05 06 07", None),
            ("0/5/2025", None),
        ];

        for (text, expected) in cases {
            assert_eq!(numeric(text), expected, "text {text:?}");
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(numeric("2025-01-31"), ok("2025-01-31", "yyyy$MM&dd"));
        assert_eq!(numeric("2025-01-32"), None);
        assert_eq!(numeric("2025-04-30"), ok("2025-04-30", "yyyy$MM&dd"));
        assert_eq!(numeric("2025-04-31"), None);
        assert_eq!(numeric("2025-02-29"), None);
        assert_eq!(numeric("2024-02-29"), ok("2024-02-29", "yyyy$MM&dd"));
        // Centuries follow the plain four-year rule.
        assert_eq!(numeric("1900-02-29"), ok("1900-02-29", "yyyy$MM&dd"));
        assert_eq!(numeric("2025-02-00"), None);
    }

    #[test]
    fn time_separators_are_not_date_delimiters() {
        assert_eq!(numeric("2025T12T12"), None);
        assert_eq!(numeric("2025_12_12"), None);
    }

    #[test]
    fn named_orderings() {
        let cases = [
            ("12 Dec 2025", ok("2025-12-12", "dd$MMM&yyyy")),
            ("December 12, 2025", ok("2025-12-12", "MMM$dd&yyyy")),
            ("2025 Dec 12", ok("2025-12-12", "yyyy$MMM&dd")),
            ("2025-12-dec", ok("2025-12-12", "yyyy$dd&MMM")),
            ("Feb 30 2024", None),
            ("12 Dec 25", None),
            ("12 Dec 45", ok("0045-12-12", "dd$MMM&yy")),
        ];

        for (text, expected) in cases {
            assert_eq!(named(text), expected, "text {text:?}");
        }
    }

    #[test]
    fn needs_three_fields() {
        assert_eq!(numeric("2025-12"), None);
        assert_eq!(named("Dec 2025"), None);
    }
}
