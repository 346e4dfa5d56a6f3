mod debug_report;

use clap::{Parser, ValueEnum};
use datetrie::{Options, Trie, parse_verbose_with, vocabulary};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Find dates and times in free text without being told their format.
#[derive(Parser)]
#[command(name = "datetrie")]
#[command(version)]
#[command(after_help = "Exit codes:\n  0  Success.\n  2  Invalid arguments or missing input.")]
struct Cli {
    /// Input text to parse. If omitted, positional text or stdin is used.
    #[arg(long, short = 'i', value_name = "TEXT", conflicts_with = "text")]
    input: Option<String>,

    /// Input text, joined with spaces.
    #[arg(value_name = "TEXT", trailing_var_arg = true)]
    text: Vec<String>,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Force ANSI color output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,

    /// Print one of the prediction tries instead of parsing.
    #[arg(long, value_name = "TRIE")]
    tree: Option<TreeKind>,

    /// Leave times that have no date in front of them unattached.
    #[arg(long)]
    no_standalone_times: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TreeKind {
    Month,
    Weekday,
    Date,
    Time,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let color = if cli.no_color { false } else { cli.color || io::stdout().is_terminal() };

    if let Some(kind) = cli.tree {
        print_tree(kind);
        return;
    }

    let input = match resolve_input(&cli) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let options = Options { attach_standalone_times: !cli.no_standalone_times, ..Options::default() };
    let report = parse_verbose_with(&input, &options);
    debug_report::print_run(&report, color);
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).init();
    }
}

fn resolve_input(cli: &Cli) -> Result<String, String> {
    let input = match (&cli.input, cli.text.is_empty()) {
        (Some(value), _) => value.clone(),
        (None, false) => cli.text.join(" "),
        (None, true) => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err("error: no input provided (pass text, --input, or pipe it on stdin)".to_string());
    }
    Ok(input)
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_tree(kind: TreeKind) {
    let vocab = vocabulary();
    let trie: &Trie = match kind {
        TreeKind::Month => &vocab.months,
        TreeKind::Weekday => &vocab.weekdays,
        TreeKind::Date => &vocab.date_shapes,
        TreeKind::Time => &vocab.time_shapes,
    };
    println!("{}", trie.pattern());
    print!("{}", trie.render());
}
