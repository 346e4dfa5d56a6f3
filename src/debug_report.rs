use datetrie::{FragmentKind, FragmentSummary, LocalDateModel, ParseReport};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(report: &ParseReport, color: bool) {
    let palette = ansi::Palette::new(color);
    let preview: String = report.text.trim_end().chars().take(120).collect();
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", preview), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Fragments ━━━", ansi::GRAY));
    if report.fragments.is_empty() {
        println!("{}", palette.dim("  Nothing date- or time-shaped in the input"));
    } else {
        for fragment in &report.fragments {
            println!("  {}", fmt_fragment(fragment, &palette));
        }
    }

    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    if report.results.is_empty() {
        println!("{}", palette.dim("  No dates resolved"));
        if !report.fragments.is_empty() {
            println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
            println!("  • No field could be read as a year (two values above 31, or none)");
            println!("  • The day does not exist in that month");
            println!("\n{}", palette.dim("  Tip: run with -vv to see why each fragment was dropped"));
        }
    } else {
        print_results(&report.results, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Scan: {}  │  Resolve: {}",
        palette.paint(format!("{:?}", report.total), ansi::GREEN),
        palette.paint(format!("{:?}", report.scan), ansi::CYAN),
        palette.dim(format!("{:?}", report.resolve)),
    );
    println!();
}

fn print_results(results: &[LocalDateModel], palette: &ansi::Palette) {
    for (idx, model) in results.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(&model.date_time_string, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("span {}..{}", model.start, model.end), ansi::YELLOW),
        );
        println!(
            "      {} {}  {} {}",
            palette.dim("text:"),
            palette.paint(&model.original_text, ansi::BLUE),
            palette.dim("│ format:"),
            palette.paint(&model.identified_date_format, ansi::CYAN)
        );
    }
}

fn fmt_fragment(fragment: &FragmentSummary, palette: &ansi::Palette) -> String {
    let kind = match fragment.kind {
        FragmentKind::Date => "date",
        FragmentKind::Time => "time",
    };
    let status = if fragment.resolved { palette.paint("✓", ansi::GREEN) } else { palette.dim("✗") };
    format!(
        "{} {} {} {}",
        status,
        palette.paint(format!("{}..{}", fragment.start, fragment.end), ansi::YELLOW),
        palette.paint(kind, ansi::BLUE),
        palette.dim(&fragment.text)
    )
}
