//! Fixed literal tables and the process-wide tries built from them.
//!
//! The tries are built once, on first use, behind a `once_cell::sync::Lazy`
//! and are never mutated afterwards.
//!
//! Shape patterns are written over a small symbolic alphabet:
//!
//! ```text
//! D  one digit
//! *  one delimiter or date/time separator character
//! M  a complete month name (any length)
//! ```
//!
//! Time patterns use `D` for digits and the literal separators `:` `.` `,` and
//! a trailing space.

use crate::trie::Trie;
use once_cell::sync::Lazy;

pub const WEEKDAY_FULL: &[&str] = &["sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday"];

pub const WEEKDAY_SHORT: &[&str] = &["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

pub const MONTH_FULL: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub const MONTH_SHORT: &[&str] = &["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"];

pub const DATE_SHAPES: &[&str] = &[
    // year first
    "DDDD*DD*DD",
    "DDDD*D*DD",
    "DDDD*DD*D",
    "DDDD*D*D",
    // two-digit year first (or day first with a two-digit year last)
    "DD*DD*DD",
    "DD*D*DD",
    "DD*DD*D",
    "DD*D*D",
    // four-digit year last
    "DD*DD*DDDD",
    "D*DD*DDDD",
    "DD*D*DDDD",
    "D*D*DDDD",
    // two-digit year last
    "D*DD*DD",
    "D*D*DD",
    // month names
    "DDDD*M*DD",
    "DDDD*M*D",
    "DD*M*DD",
    "DD*M*D",
    "DD*M*DDDD",
    "D*M*DDDD",
    "D*M*DD",
    "M*DD*DDDD",
    "M*D*DDDD",
    "M*DD*DD",
    "M*D*DD",
    "M*DD**DDDD",
    "M*D**DDDD",
    "M*DD**DD",
    "M*D**DD",
];

pub const TIME_SHAPES: &[&str] = &[
    "DD:DD:DD",
    "DD:DD:DD ",
    "DD:DD:DD.DDD",
    "DD:DD:DD.DDD ",
    "DD:DD:DD,DDD",
    "DD:DD:DD,DDD ",
    "D:DD:DD",
    "D:DD:DD ",
    "D:DD:DD.DDD",
    "D:DD:DD.DDD ",
    "D:DD:DD,DDD",
    "D:DD:DD,DDD ",
];

/// Shape symbol for a digit.
pub const DIGIT: char = 'D';
/// Shape symbol for a delimiter or separator.
pub const DELIM: char = '*';
/// Shape symbol for a complete month name.
pub const MONTH: char = 'M';

/// Characters splitting the fields of a date.
pub const DATE_DELIMITERS: &str = "\\/ -.,:_";
/// Characters that may sit between a date and the time that follows it.
pub const TIME_SEPARATORS: &str = " _-T";

bitflags::bitflags! {
    /// Character classes seen by the scanner.
    ///
    /// A character may belong to several classes (`-` is both a date
    /// delimiter and a date/time separator).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharClass: u8 {
        const DIGIT          = 1 << 0;
        const DELIMITER      = 1 << 1;
        const TIME_SEPARATOR = 1 << 2;
        const ALPHA          = 1 << 3;
    }
}

impl CharClass {
    pub fn of(c: char) -> Self {
        let mut class = CharClass::empty();
        if c.is_ascii_digit() {
            class |= CharClass::DIGIT;
        }
        if DATE_DELIMITERS.contains(c) {
            class |= CharClass::DELIMITER;
        }
        if TIME_SEPARATORS.contains(c) {
            class |= CharClass::TIME_SEPARATOR;
        } else if c.is_alphabetic() {
            // Upper-case `T` is a separator only: it never starts a name.
            class |= CharClass::ALPHA;
        }
        class
    }

    /// Whether the character advances the date-shape trie.
    pub fn is_shape(self) -> bool {
        self.intersects(CharClass::DIGIT | CharClass::DELIMITER | CharClass::TIME_SEPARATOR)
    }

    /// The shape symbol for a character of this class.
    pub fn shape_symbol(self) -> char {
        if self.contains(CharClass::DIGIT) { DIGIT } else { DELIM }
    }
}

/// The four shared tries.
#[derive(Debug)]
pub struct Vocabulary {
    pub months: Trie,
    pub weekdays: Trie,
    pub date_shapes: Trie,
    pub time_shapes: Trie,
}

impl Vocabulary {
    fn build() -> Self {
        Vocabulary {
            months: Trie::build(MONTH_FULL.iter().chain(MONTH_SHORT).copied()),
            weekdays: Trie::build(WEEKDAY_FULL.iter().chain(WEEKDAY_SHORT).copied()),
            date_shapes: Trie::build(DATE_SHAPES.iter().copied()),
            time_shapes: Trie::build(TIME_SHAPES.iter().copied()),
        }
    }
}

static VOCABULARY: Lazy<Vocabulary> = Lazy::new(|| {
    let vocab = Vocabulary::build();
    tracing::debug!(
        months = vocab.months.len(),
        weekdays = vocab.weekdays.len(),
        date_shapes = vocab.date_shapes.len(),
        time_shapes = vocab.time_shapes.len(),
        "vocabulary tries built"
    );
    vocab
});

/// Shared read-only tries, built on first access.
pub fn vocabulary() -> &'static Vocabulary {
    &VOCABULARY
}

/// Month number (1-12) for a short or full month name, case-insensitive.
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_FULL
        .iter()
        .position(|m| *m == lower)
        .or_else(|| MONTH_SHORT.iter().position(|m| *m == lower))
        .map(|idx| idx as u32 + 1)
}

/// Whether `text` contains a full month name anywhere.
pub fn has_full_month(text: &str) -> bool {
    let lower = text.to_lowercase();
    MONTH_FULL.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_classes_overlap_where_expected() {
        assert_eq!(CharClass::of('7'), CharClass::DIGIT);
        assert_eq!(CharClass::of('-'), CharClass::DELIMITER | CharClass::TIME_SEPARATOR);
        assert_eq!(CharClass::of(' '), CharClass::DELIMITER | CharClass::TIME_SEPARATOR);
        assert_eq!(CharClass::of('T'), CharClass::TIME_SEPARATOR);
        assert_eq!(CharClass::of('t'), CharClass::ALPHA);
        assert_eq!(CharClass::of('#'), CharClass::empty());
        assert_eq!(CharClass::of('4').shape_symbol(), DIGIT);
        assert_eq!(CharClass::of('/').shape_symbol(), DELIM);
        assert!(!CharClass::of('x').is_shape());
    }

    #[test]
    fn tries_hold_every_literal() {
        let vocab = vocabulary();
        for name in MONTH_FULL.iter().chain(MONTH_SHORT) {
            assert!(vocab.months.contains(name), "missing month {name}");
        }
        for name in WEEKDAY_FULL.iter().chain(WEEKDAY_SHORT) {
            assert!(vocab.weekdays.contains(name), "missing weekday {name}");
        }
        for shape in DATE_SHAPES {
            assert!(vocab.date_shapes.contains(shape), "missing shape {shape}");
        }
        for shape in TIME_SHAPES {
            assert!(vocab.time_shapes.contains(shape), "missing time shape {shape}");
        }
        assert_eq!(vocab.date_shapes.max_depth(), 10);
        assert_eq!(vocab.time_shapes.max_depth(), 13);
    }

    #[test]
    fn month_numbers_cover_both_widths() {
        assert_eq!(month_number("January"), Some(1));
        assert_eq!(month_number("sep"), Some(9));
        assert_eq!(month_number("DEC"), Some(12));
        assert_eq!(month_number("sept"), None);
        assert!(has_full_month("12 december 2025"));
        assert!(!has_full_month("12 dec 2025"));
    }
}
