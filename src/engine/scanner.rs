//! Fragment scanner.
//!
//! A single left-to-right pass over the input that cuts out date-shaped and
//! time-shaped runs. The scanner is an explicit state machine:
//!
//! ```text
//!              shape char / name char
//!           ┌──────────────────────────┐
//!           v                          │
//!   ┌───────────────┐  date closes,  ┌──┴────────────┐
//!   │ Date(DateScan)│ ─────────────> │ Time(TimeScan)│
//!   └───────────────┘  separator     └───────────────┘
//!           ^           follows              │
//!           └────────────────────────────────┘
//!              time emitted or abandoned
//! ```
//!
//! Both states walk a trie one character at a time. The walk is greedy: a
//! terminal node only records a checkpoint, and a fragment is cut when the
//! walk can no longer be extended. The cursor then rewinds to the character
//! after the checkpoint, so the text the longer attempt consumed gets a
//! second look.
//!
//! A date-shaped run that is really a time (`10:15:30`) is handed over to the
//! time state as a standalone time.

use crate::trie::{NodeId, Trie};
use crate::vocab::{CharClass, DIGIT, MONTH, vocabulary};
use crate::{DateElement, Fragment, Range, TimePiece};

/// Text collected for one fragment attempt, with its byte span.
#[derive(Debug, Default, Clone)]
struct Buffer {
    text: String,
    start: usize,
    end: usize,
}

impl Buffer {
    fn push(&mut self, at: usize, c: char) {
        if self.text.is_empty() {
            self.start = at;
        }
        self.text.push(c);
        self.end = at + c.len_utf8();
    }

    fn pop(&mut self) -> Option<char> {
        let c = self.text.pop()?;
        self.end -= c.len_utf8();
        Some(c)
    }

    fn truncate(&mut self, checkpoint: &Checkpoint) {
        self.text.truncate(checkpoint.len);
        self.end = checkpoint.end;
    }

    fn clear(&mut self) {
        self.text.clear();
    }

    fn range(&self) -> Range {
        Range { start: self.start, end: self.end }
    }
}

/// Buffer state at the last terminal node.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    /// Buffer length in bytes.
    len: usize,
    end: usize,
    alphanumeric: bool,
    /// Character index to continue from once the fragment is cut here.
    resume: usize,
}

/// A month name being read.
#[derive(Debug, Clone, Copy)]
struct NameRun {
    node: NodeId,
    complete: bool,
}

#[derive(Debug, Clone, Copy)]
struct DateScan {
    /// Position in the date-shape trie.
    node: NodeId,
    name: Option<NameRun>,
    last_terminal: Option<Checkpoint>,
    alphanumeric: bool,
    /// Ignore letters until the current word ends.
    skip_word: bool,
}

impl DateScan {
    fn new() -> Self {
        DateScan { node: Trie::ROOT, name: None, last_terminal: None, alphanumeric: false, skip_word: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeMode {
    /// Directly after a date, joined by `separator`.
    Attached { separator: char },
    /// A time with no date in front of it.
    Standalone,
}

#[derive(Debug, Clone, Copy)]
struct TimeScan {
    mode: TimeMode,
    /// Position in the time-shape trie.
    node: NodeId,
    checkpoint: Option<Checkpoint>,
    /// Where date scanning restarts if nothing usable is found.
    start: usize,
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Date(DateScan),
    Time(TimeScan),
}

impl ScanState {
    fn date() -> Self {
        ScanState::Date(DateScan::new())
    }
}

/// Symbol used to walk the time-shape trie.
fn time_symbol(c: char) -> char {
    if c.is_ascii_digit() { DIGIT } else { c.to_ascii_lowercase() }
}

/// One scan over one input.
pub(crate) struct Scanner<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    date: Buffer,
    time: Buffer,
    fragments: Vec<Fragment>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Scanner {
            input,
            chars: input.char_indices().collect(),
            date: Buffer::default(),
            time: Buffer::default(),
            fragments: Vec::new(),
        }
    }

    /// Run the scan to the end of the input.
    pub fn scan(mut self) -> Vec<Fragment> {
        let mut state = ScanState::date();
        let mut idx = 0;

        loop {
            let step = match self.chars.get(idx) {
                Some(&(_, c)) => Some(self.step(state, idx, c)),
                None => self.flush(state),
            };
            match step {
                Some((next_state, next_idx)) => {
                    state = next_state;
                    idx = next_idx;
                }
                None => break,
            }
        }

        tracing::debug!(input_len = self.input.len(), fragments = self.fragments.len(), "scan finished");
        self.fragments
    }

    fn step(&mut self, state: ScanState, idx: usize, c: char) -> (ScanState, usize) {
        match state {
            ScanState::Date(scan) => self.step_date(scan, idx, c),
            ScanState::Time(scan) => self.step_time(scan, idx, c),
        }
    }

    /// End of input. Returns the state to continue with, if any.
    fn flush(&mut self, state: ScanState) -> Option<(ScanState, usize)> {
        let len = self.chars.len();
        match state {
            ScanState::Date(scan) if scan.last_terminal.is_some() => Some(self.close_date(scan)),
            ScanState::Date(_) => None,
            ScanState::Time(scan) if vocabulary().time_shapes.is_terminal(scan.node) => {
                self.emit_time(scan.mode, false);
                None
            }
            ScanState::Time(scan) => Some(self.abandon_time(scan, len)),
        }
    }

    fn follows_digit(&self, idx: usize) -> bool {
        idx.checked_sub(1).and_then(|prev| self.chars.get(prev)).is_some_and(|&(_, c)| c.is_ascii_digit())
    }

    fn byte_at(&self, idx: usize) -> usize {
        self.chars.get(idx).map_or(self.input.len(), |&(at, _)| at)
    }

    // --- Date state ---------------------------------------------------------

    fn step_date(&mut self, mut scan: DateScan, idx: usize, c: char) -> (ScanState, usize) {
        let class = CharClass::of(c);
        let in_word = scan.name.is_some() || scan.skip_word;
        if class.contains(CharClass::ALPHA) || (in_word && c.is_alphabetic()) {
            return self.step_name(scan, idx, c);
        }
        scan.skip_word = false;

        // A date never starts inside a longer number.
        if self.date.text.is_empty() && class.contains(CharClass::DIGIT) && self.follows_digit(idx) {
            return (ScanState::Date(scan), idx + 1);
        }

        if !class.is_shape() {
            return self.break_date(scan, idx);
        }

        // Runs of spaces count as one.
        if c == ' ' && self.date.text.len() > 1 && self.date.text.ends_with(' ') {
            return (ScanState::Date(scan), idx + 1);
        }

        let shapes = &vocabulary().date_shapes;
        if let Some(name) = scan.name.take() {
            if !name.complete {
                return self.break_date(scan, idx);
            }
            match shapes.child(scan.node, MONTH) {
                Some(node) => {
                    scan.node = node;
                    scan.alphanumeric = true;
                }
                None => return self.break_date(scan, idx),
            }
        }

        match shapes.child(scan.node, class.shape_symbol()) {
            Some(node) => {
                let at = self.byte_at(idx);
                self.date.push(at, c);
                scan.node = node;
                if shapes.is_terminal(node) {
                    scan.last_terminal = Some(Checkpoint {
                        len: self.date.text.len(),
                        end: self.date.end,
                        alphanumeric: scan.alphanumeric,
                        resume: idx + 1,
                    });
                }
                (ScanState::Date(scan), idx + 1)
            }
            None => self.break_date(scan, idx),
        }
    }

    fn step_name(&mut self, mut scan: DateScan, idx: usize, c: char) -> (ScanState, usize) {
        if scan.skip_word {
            return (ScanState::Date(scan), idx + 1);
        }

        let from = match scan.name {
            Some(run) => run.node,
            None if vocabulary().date_shapes.child(scan.node, MONTH).is_none() => return self.break_date(scan, idx),
            None => Trie::ROOT,
        };

        let months = &vocabulary().months;
        match months.child(from, c.to_ascii_lowercase()) {
            Some(node) => {
                let at = self.byte_at(idx);
                self.date.push(at, c);
                scan.name = Some(NameRun { node, complete: months.is_terminal(node) });
                (ScanState::Date(scan), idx + 1)
            }
            None if scan.last_terminal.is_some() => self.break_date(scan, idx),
            None => {
                self.date.clear();
                (ScanState::Date(DateScan { skip_word: true, ..DateScan::new() }), idx + 1)
            }
        }
    }

    /// The date walk cannot take `idx`.
    fn break_date(&mut self, scan: DateScan, idx: usize) -> (ScanState, usize) {
        if scan.last_terminal.is_some() {
            return self.close_date(scan);
        }
        let retry = !self.date.text.is_empty();
        self.date.clear();
        (ScanState::date(), if retry { idx } else { idx + 1 })
    }

    /// Cut the fragment at the last terminal and pick the next state.
    fn close_date(&mut self, scan: DateScan) -> (ScanState, usize) {
        let Some(checkpoint) = scan.last_terminal else {
            self.date.clear();
            return (ScanState::date(), self.chars.len());
        };
        self.date.truncate(&checkpoint);

        if !checkpoint.alphanumeric {
            if let Some(state) = self.date_as_time(&checkpoint) {
                return state;
            }
        }

        let element = DateElement {
            text: self.date.text.clone(),
            range: self.date.range(),
            alphanumeric: checkpoint.alphanumeric,
            time: None,
        };
        tracing::debug!(text = %element.text, start = element.range.start, end = element.range.end, "date fragment");
        self.fragments.push(Fragment::Date(element));
        self.date.clear();

        self.after_date(checkpoint.resume)
    }

    /// A numeric date run that spells a complete time becomes a standalone
    /// time. It keeps scanning as a time when the next character extends it.
    fn date_as_time(&mut self, checkpoint: &Checkpoint) -> Option<(ScanState, usize)> {
        let times = &vocabulary().time_shapes;
        let node = times.walk(Trie::ROOT, self.date.text.chars().map(time_symbol))?;
        if !times.is_terminal(node) {
            return None;
        }

        self.time = std::mem::take(&mut self.date);
        let extends = self.chars.get(checkpoint.resume).is_some_and(|&(_, c)| times.child(node, time_symbol(c)).is_some());
        if extends {
            let scan = TimeScan {
                mode: TimeMode::Standalone,
                node,
                checkpoint: Some(Checkpoint { alphanumeric: false, ..*checkpoint }),
                start: checkpoint.resume,
            };
            return Some((ScanState::Time(scan), checkpoint.resume));
        }

        self.emit_time(TimeMode::Standalone, false);
        Some((ScanState::date(), checkpoint.resume))
    }

    fn after_date(&mut self, resume: usize) -> (ScanState, usize) {
        match self.chars.get(resume) {
            Some(&(_, c)) if CharClass::of(c).contains(CharClass::TIME_SEPARATOR) => {
                let scan = TimeScan {
                    mode: TimeMode::Attached { separator: c },
                    node: Trie::ROOT,
                    checkpoint: None,
                    start: resume + 1,
                };
                (ScanState::Time(scan), resume + 1)
            }
            _ => (ScanState::date(), resume),
        }
    }

    // --- Time state ---------------------------------------------------------

    fn step_time(&mut self, mut scan: TimeScan, idx: usize, c: char) -> (ScanState, usize) {
        let times = &vocabulary().time_shapes;

        if scan.mode == (TimeMode::Attached { separator: ' ' }) && self.time.text.is_empty() && c == ' ' {
            return (ScanState::Time(scan), idx + 1);
        }

        if times.is_terminal(scan.node) && c == ' ' && self.am_pm_at(idx) {
            for offset in 0..3 {
                let (at, ch) = self.chars[idx + offset];
                self.time.push(at, ch);
            }
            self.emit_time(scan.mode, true);
            return (ScanState::date(), idx + 3);
        }

        match times.child(scan.node, time_symbol(c)) {
            Some(node) => {
                let at = self.byte_at(idx);
                self.time.push(at, c);
                scan.node = node;
                if times.is_terminal(node) {
                    scan.checkpoint = Some(Checkpoint {
                        len: self.time.text.len(),
                        end: self.time.end,
                        alphanumeric: false,
                        resume: idx + 1,
                    });
                }
                (ScanState::Time(scan), idx + 1)
            }
            None if times.is_terminal(scan.node) => {
                self.emit_time(scan.mode, false);
                (ScanState::date(), idx)
            }
            None => self.abandon_time(scan, idx),
        }
    }

    /// The time walk failed short of a terminal node.
    fn abandon_time(&mut self, scan: TimeScan, idx: usize) -> (ScanState, usize) {
        if has_dangling_fraction(&self.time.text) {
            self.time.pop();
            self.emit_time(scan.mode, false);
            return (ScanState::date(), idx);
        }

        if let Some(checkpoint) = scan.checkpoint {
            self.time.truncate(&checkpoint);
            self.emit_time(scan.mode, false);
            return (ScanState::date(), checkpoint.resume);
        }

        tracing::trace!(text = %self.time.text, "time fragment discarded");
        self.time.clear();
        (ScanState::date(), scan.start)
    }

    /// `" am"` or `" pm"` at `idx`, not followed by another letter.
    fn am_pm_at(&self, idx: usize) -> bool {
        let letter = |offset: usize| self.chars.get(idx + offset).map(|&(_, c)| c.to_ascii_lowercase());
        let marker = matches!(letter(1), Some('a' | 'p')) && letter(2) == Some('m');
        let bounded = self.chars.get(idx + 3).is_none_or(|&(_, c)| !c.is_alphabetic());
        marker && bounded
    }

    fn emit_time(&mut self, mode: TimeMode, has_am_pm: bool) {
        while self.time.text.ends_with(' ') {
            self.time.pop();
        }
        if self.time.text.is_empty() {
            return;
        }

        let separator = match mode {
            TimeMode::Attached { separator } => separator,
            TimeMode::Standalone => ' ',
        };
        let piece = TimePiece { text: self.time.text.clone(), range: self.time.range(), has_am_pm, separator };
        self.time.clear();
        tracing::debug!(text = %piece.text, standalone = mode == TimeMode::Standalone, "time fragment");

        match (mode, self.fragments.last_mut()) {
            (TimeMode::Attached { .. }, Some(Fragment::Date(element))) => element.time = Some(piece),
            _ => self.fragments.push(Fragment::Time(piece)),
        }
    }
}

/// A complete time followed by a `.` or `,` with no fraction digits, such as
/// `"10:15:30."` at the end of a sentence.
fn has_dangling_fraction(text: &str) -> bool {
    let separators: String = text.chars().filter(|c| !c.is_ascii_digit()).collect();
    (2..=3).contains(&separators.len()) && separators.starts_with("::") && text.ends_with(['.', ','])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<(String, Option<String>)> {
        Scanner::new(input)
            .scan()
            .into_iter()
            .map(|f| match f {
                Fragment::Date(e) => (e.text, e.time.map(|t| t.text)),
                Fragment::Time(t) => (format!("time {}", t.text), None),
            })
            .collect()
    }

    fn one(text: &str) -> (String, Option<String>) {
        (text.to_string(), None)
    }

    #[test]
    fn numeric_dates() {
        assert_eq!(texts("2025-12-12"), vec![one("2025-12-12")]);
        assert_eq!(texts("on 1/2/2025."), vec![one("1/2/2025")]);
        assert_eq!(texts("12.12.25 and 3.4.99"), vec![one("12.12.25"), one("3.4.99")]);
    }

    #[test]
    fn month_names() {
        assert_eq!(texts("Friday, December 12, 2025"), vec![one("December 12, 2025")]);
        assert_eq!(texts("due 12 DEC 2025!"), vec![one("12 DEC 2025")]);
        assert_eq!(texts("12 OCT 2025"), vec![one("12 OCT 2025")]);
        assert_eq!(texts("Mayday 2025"), vec![]);
    }

    #[test]
    fn collapses_repeated_spaces() {
        let fragments = Scanner::new("Dec 12,   2025").scan();
        let Fragment::Date(element) = &fragments[0] else { panic!("expected a date") };
        assert_eq!(element.text, "Dec 12, 2025");
        assert_eq!(element.range, Range { start: 0, end: 14 });
    }

    #[test]
    fn attached_times() {
        assert_eq!(
            texts("2025-12-14T09:30:00.000 ok"),
            vec![("2025-12-14".to_string(), Some("09:30:00.000".to_string()))]
        );
        assert_eq!(
            texts("12 Dec 2025 10:15:30 pm"),
            vec![("12 Dec 2025".to_string(), Some("10:15:30 pm".to_string()))]
        );
        assert_eq!(
            texts("at 2025-12-14 09:30:00."),
            vec![("2025-12-14".to_string(), Some("09:30:00".to_string()))]
        );
    }

    #[test]
    fn am_pm_needs_word_boundary() {
        assert_eq!(
            texts("2025-12-14 09:30:00 amber"),
            vec![("2025-12-14".to_string(), Some("09:30:00".to_string()))]
        );
    }

    #[test]
    fn standalone_times() {
        assert_eq!(
            texts("event at 10:15:30.500 on 2025-12-12"),
            vec![one("time 10:15:30.500"), one("2025-12-12")]
        );
        assert_eq!(texts("10:15:30"), vec![one("time 10:15:30")]);
    }

    #[test]
    fn failed_time_rescans_as_date() {
        assert_eq!(texts("2025-12-12 2025-12-13"), vec![one("2025-12-12"), one("2025-12-13")]);
    }

    #[test]
    fn backtracks_to_last_terminal() {
        // "1/2/20" is complete; the third digit starts a failed longer match.
        assert_eq!(texts("1/2/202x"), vec![one("1/2/20")]);
    }

    #[test]
    fn no_dates_inside_longer_numbers() {
        assert!(texts("ref 20251-12-2025").is_empty());
        assert!(texts("serial 99912/12/2025").is_empty());
        assert_eq!(texts("no 12345 but 12/12/2025"), vec![one("12/12/2025")]);
    }

    #[test]
    fn spans_are_byte_offsets() {
        let input = "é 2025-12-12";
        let fragments = Scanner::new(input).scan();
        let range = fragments[0].range();
        assert_eq!(&input[range.start..range.end], "2025-12-12");
    }

    #[test]
    fn nothing_in_plain_text() {
        assert!(texts("not a date at all").is_empty());
        assert!(texts("").is_empty());
    }

    #[test]
    fn dangling_fraction() {
        assert!(has_dangling_fraction("09:30:00."));
        assert!(has_dangling_fraction("9:30:00,"));
        assert!(!has_dangling_fraction("09:30:00.5"));
        assert!(!has_dangling_fraction("09.30"));
    }
}
