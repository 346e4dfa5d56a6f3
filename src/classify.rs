//! Token classification.
//!
//! Cheap heuristics that label an isolated, already delimiter-split token.
//! The letter checks short-circuit vocabulary lookups: none of the configured
//! month or weekday names contain `k`, `q`, `x` or `z`, no weekday name
//! contains `b c g j l p v`, and no month name contains `w`.

use crate::vocab::vocabulary;

/// Classification of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// One or two digits.
    TwoDigit,
    ThreeDigit,
    FourDigit,
    Weekday,
    Month,
    Unrecognized,
}

impl LiteralKind {
    /// True for the numeral classes.
    pub fn is_numeral(self) -> bool {
        matches!(self, LiteralKind::TwoDigit | LiteralKind::ThreeDigit | LiteralKind::FourDigit)
    }
}

/// Classify `token`.
///
/// ```text
/// "7"        -> TwoDigit        "2025" -> FourDigit
/// "Tuesday"  -> Weekday         "dec"  -> Month
/// "zebra"    -> Unrecognized    "12345" -> Unrecognized
/// ```
pub fn classify_literal(token: &str) -> LiteralKind {
    let lower = token.to_lowercase();
    let len = lower.chars().count();

    if len > 9 {
        return LiteralKind::Unrecognized;
    }
    if is_digits(&lower) {
        return match len {
            0..=2 => LiteralKind::TwoDigit,
            3 => LiteralKind::ThreeDigit,
            4 => LiteralKind::FourDigit,
            _ => LiteralKind::Unrecognized,
        };
    }
    if len <= 2 {
        return LiteralKind::Unrecognized;
    }
    if lower.contains(['k', 'q', 'x', 'z']) {
        return LiteralKind::Unrecognized;
    }
    if is_weekday_literal(&lower) {
        return LiteralKind::Weekday;
    }
    if is_month_literal(&lower) {
        return LiteralKind::Month;
    }
    LiteralKind::Unrecognized
}

fn is_weekday_literal(lower: &str) -> bool {
    if lower.contains(['b', 'c', 'g', 'j', 'l', 'p', 'v']) {
        return false;
    }
    vocabulary().weekdays.contains(lower)
}

fn is_month_literal(lower: &str) -> bool {
    if lower.contains('w') {
        return false;
    }
    if lower.chars().count() == 3 && lower.contains(['h', 'i']) {
        return false;
    }
    vocabulary().months.contains(lower)
}

/// Non-empty and made only of ASCII digits.
pub(crate) fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_tokens() {
        let cases = [
            ("7", LiteralKind::TwoDigit),
            ("07", LiteralKind::TwoDigit),
            ("123", LiteralKind::ThreeDigit),
            ("2025", LiteralKind::FourDigit),
            ("20251", LiteralKind::Unrecognized),
            ("Friday", LiteralKind::Weekday),
            ("thu", LiteralKind::Weekday),
            ("Dec", LiteralKind::Month),
            ("september", LiteralKind::Month),
            ("may", LiteralKind::Month),
            ("ab", LiteralKind::Unrecognized),
            ("", LiteralKind::Unrecognized),
            ("quiz", LiteralKind::Unrecognized),
            ("tuesdays", LiteralKind::Unrecognized),
            ("wednesdayx", LiteralKind::Unrecognized),
            ("12a", LiteralKind::Unrecognized),
        ];

        for (token, expected) in cases {
            assert_eq!(classify_literal(token), expected, "token {token:?}");
        }
    }

    #[test]
    fn numeral_predicate() {
        assert!(LiteralKind::FourDigit.is_numeral());
        assert!(!LiteralKind::Month.is_numeral());
        assert!(!LiteralKind::Unrecognized.is_numeral());
    }
}
