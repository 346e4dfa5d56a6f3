use crate::engine;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::time::Duration;

/// Options that affect scanning and formatting.
#[derive(Debug, Clone)]
pub struct Options {
    /// Give a time that has no date in front of it to a nearby date.
    pub attach_standalone_times: bool,
    /// Report `MMMMM` instead of `MMM` when the text spells a full month name.
    pub widen_full_month_names: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { attach_standalone_times: true, widen_full_month_names: true }
    }
}

/// A date (and possibly time) found in the input.
///
/// `start`/`end` are byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDateModel {
    /// Slice of the input that matched, time included.
    pub original_text: String,
    /// `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD HH:MM:SS.mmm`.
    pub date_time_string: String,
    /// Layout of `date_time_string`, e.g. `yyyy-MM-dd HH:mm:ss`.
    pub canonical_format: String,
    /// Best guess at the layout of `original_text`, e.g. `dd/MM/yyyy`.
    pub identified_date_format: String,
    /// Start byte index of the match.
    pub start: usize,
    /// End byte index of the match (exclusive).
    pub end: usize,
    pub(crate) year: u32,
    pub(crate) month: u32,
    pub(crate) day: u32,
    pub(crate) time: Option<NaiveTime>,
}

impl LocalDateModel {
    /// The calendar date, if chrono accepts it.
    ///
    /// Century years such as 1900 are leap years here but not in chrono, so
    /// `1900-02-29` is reported by [`parse`] and returns `None`.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::try_from(self.year).ok()?, self.month, self.day)
    }

    /// The time of day, when one was attached and valid.
    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Date and time as a chrono value; midnight when no time was found.
    pub fn naive_date_time(&self) -> Option<NaiveDateTime> {
        let date = self.date()?;
        Some(date.and_time(self.time.unwrap_or(NaiveTime::MIN)))
    }
}

/// Kind of a scanner fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// A date, possibly with a time right after it.
    Date,
    /// A time with no date in front of it.
    Time,
}

/// A compact fragment summary used in verbose reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSummary {
    pub kind: FragmentKind,
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub resolved: bool,
}

/// Result from [`parse_verbose_with`].
///
/// Meant for debugging and performance inspection: the results plus every
/// fragment the scanner cut out, and the stage timings.
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub text: String,
    pub results: Vec<LocalDateModel>,
    pub fragments: Vec<FragmentSummary>,
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent scanning.
    pub scan: Duration,
    /// Time spent resolving fragments and building results.
    pub resolve: Duration,
}

/// Find every date in `text` using default [`Options`].
///
/// # Example
/// ```
/// use datetrie::parse;
///
/// let out = parse("due 31/12/2025");
/// assert_eq!(out[0].date_time_string, "2025-12-31");
/// assert_eq!(out[0].identified_date_format, "dd/MM/yyyy");
/// assert_eq!((out[0].start, out[0].end), (4, 14));
/// ```
pub fn parse(text: &str) -> Vec<LocalDateModel> {
    parse_with(text, &Options::default())
}

/// Find every date in `text` using the provided `options`.
pub fn parse_with(text: &str, options: &Options) -> Vec<LocalDateModel> {
    engine::Parser::new(text, options).run()
}

/// Parse `text` with `options` and return extra (compact) debug details.
///
/// The default [`parse_with`] path does not keep these traces.
pub fn parse_verbose_with(text: &str, options: &Options) -> ParseReport {
    let run = engine::Parser::new(text, options).run_with_metrics();

    let fragments = run
        .fragments
        .into_iter()
        .map(|f| FragmentSummary { kind: f.kind, start: f.start, end: f.end, text: f.text, resolved: f.resolved })
        .collect();

    ParseReport {
        text: text.to_string(),
        results: run.models,
        fragments,
        total: run.metrics.total,
        scan: run.metrics.scan,
        resolve: run.metrics.resolve,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_returns_models() {
        let out = parse("Due: 2025-12-12.");
        assert_eq!(out.len(), 1);

        let model = &out[0];
        assert_eq!(model.original_text, "2025-12-12");
        assert_eq!(model.date_time_string, "2025-12-12");
        assert_eq!(model.canonical_format, "yyyy-MM-dd");
        assert_eq!(model.identified_date_format, "yyyy-MM-dd");
        assert_eq!((model.start, model.end), (5, 15));
        assert_eq!(model.date(), NaiveDate::from_ymd_opt(2025, 12, 12));
        assert_eq!(model.time(), None);
    }

    #[test]
    fn naive_date_time_includes_time() {
        let out = parse("2025-12-14T09:30:00");
        let expected = NaiveDate::from_ymd_opt(2025, 12, 14).and_then(|d| d.and_hms_opt(9, 30, 0));
        assert_eq!(out[0].naive_date_time(), expected);
        assert_eq!(out[0].canonical_format, "yyyy-MM-dd HH:mm:ss");
    }

    #[test]
    fn century_leap_day_has_no_chrono_value() {
        let out = parse("1900-02-29");
        assert_eq!(out[0].date_time_string, "1900-02-29");
        assert_eq!(out[0].naive_date_time(), None);
    }

    #[test]
    fn verbose_reports_every_fragment() {
        let report = parse_verbose_with("on 2025-02-30 and 2025-02-28", &Options::default());

        assert_eq!(report.text, "on 2025-02-30 and 2025-02-28");
        assert_eq!(report.results.len(), 1);
        assert_eq!(
            report.fragments,
            vec![
                FragmentSummary {
                    kind: FragmentKind::Date,
                    start: 3,
                    end: 13,
                    text: "2025-02-30".into(),
                    resolved: false
                },
                FragmentSummary {
                    kind: FragmentKind::Date,
                    start: 18,
                    end: 28,
                    text: "2025-02-28".into(),
                    resolved: true
                },
            ]
        );
        assert!(report.scan <= report.total);
        assert!(report.resolve <= report.total);
    }

    #[test]
    fn options_disable_standalone_times() {
        let text = "at 10:15:30 on 2025-12-12";
        assert_eq!(parse(text)[0].date_time_string, "2025-12-12 10:15:30");

        let opts = Options { attach_standalone_times: false, ..Options::default() };
        assert_eq!(parse_with(text, &opts)[0].date_time_string, "2025-12-12");
    }
}
