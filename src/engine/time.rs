//! Time resolution.
//!
//! ```text
//! "10:15:30"        -> 10:15:30       HH:mm:ss
//! "10:15:30,250"    -> 10:15:30.250   HH:mm:ss,SSS
//! "10:15:30 pm"     -> 22:15:30       hh:mm:ss
//! ```

use crate::TimePiece;
use chrono::NaiveTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedTime {
    pub time: NaiveTime,
    /// Separator in front of the milliseconds, when the text had them.
    pub fraction: Option<char>,
    pub twelve_hour: bool,
}

impl ResolvedTime {
    /// `HH:MM:SS`, or `HH:MM:SS.mmm` when the text carried milliseconds.
    pub fn canonical(&self) -> String {
        match self.fraction {
            Some(_) => self.time.format("%H:%M:%S%.3f").to_string(),
            None => self.time.format("%H:%M:%S").to_string(),
        }
    }

    pub fn format_tag(&self) -> String {
        let hour = if self.twelve_hour { "hh" } else { "HH" };
        match self.fraction {
            Some(sep) => format!("{hour}:mm:ss{sep}SSS"),
            None => format!("{hour}:mm:ss"),
        }
    }
}

pub(crate) fn resolve_time(piece: &TimePiece) -> Option<ResolvedTime> {
    let text = piece.text.as_str();
    let fraction = text.chars().find(|c| matches!(c, '.' | ','));

    let fields: Vec<u32> = match fraction {
        Some(_) => regex!(r"[:., ]+").split(text).filter_map(|t| t.parse().ok()).take(4).collect(),
        None => regex!(r"[: ]+").split(text).filter_map(|t| t.parse().ok()).take(3).collect(),
    };
    let (mut hour, minute, second, millis) = match fields[..] {
        [h, m, s, ms] => (h, m, s, ms),
        [h, m, s] if fraction.is_none() => (h, m, s, 0),
        _ => return None,
    };

    if piece.has_am_pm && text.to_lowercase().contains("pm") {
        hour += 12;
    }

    if hour >= 24 || minute >= 60 || second >= 60 || millis >= 10_000 {
        tracing::trace!(text, hour, minute, second, millis, "time out of range");
        return None;
    }

    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;
    Some(ResolvedTime { time, fraction, twelve_hour: piece.has_am_pm })
}

/// How the character between a date and its time appears in a format string.
pub(crate) fn separator_token(separator: char) -> String {
    match separator {
        'T' => "'T'".to_string(),
        other => other.to_string(),
    }
}
