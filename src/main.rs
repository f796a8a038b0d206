//! testgen — write `tests.json` and `orphan.json` from annotated UI tests.
//!
//! `testgen --path MyApp` scans every `*.swift` file under a `UITests`
//! path and writes both reports to the output directory (default: `.`).

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use testgen::filter::{self, TagFilter};
use testgen::output::{self, DirSink};
use testgen::Error;

const HINT: &str = "Hint: Make sure the specified directory exists and contains valid Swift files.";

#[derive(Parser)]
#[command(
    name = "testgen",
    about = "Extract Given/When/Then test intents from UI test sources into JSON"
)]
struct Cli {
    /// Directory to scan for UI test sources
    #[arg(short = 'p', long)]
    path: Option<String>,

    /// Directory that receives tests.json and orphan.json
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,

    /// Keep documented tests by tag. Prefix with ! to exclude.
    /// Can be specified multiple times. E.g. --filter smoke --filter '!team:ios'
    #[arg(long)]
    filter: Vec<String>,

    /// Print the unique tags of documented tests
    #[arg(long)]
    list_tags: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("warning: {e:#}");
    }

    let root = match cli.path.as_deref() {
        Some(p) if !p.is_empty() => Path::new(p),
        _ => {
            print_usage();
            return ExitCode::SUCCESS;
        }
    };

    match run(&cli, root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {e:#}");
            if matches!(e.downcast_ref::<Error>(), Some(Error::Traversal { .. } | Error::Read { .. })) {
                println!("{HINT}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Accept the Go-style single-dash `-path` spelling as `--path`.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-path") => OsString::from("--path"),
            Some(s) if s.starts_with("-path=") => OsString::from(format!("-{s}")),
            _ => arg,
        })
        .collect()
}

fn print_usage() {
    println!("Usage: testgen --path <directory_path>");
    println!("  -p, --path <directory_path>  Directory path to parse Swift files");
}

fn run(cli: &Cli, root: &Path) -> Result<()> {
    let filters = parse_filters(&cli.filter)?;

    let mut report = testgen::scan_tree(root)?;
    filter::apply(&mut report.documented, &filters);

    if cli.list_tags {
        for tag in filter::tag_index(&report.documented) {
            println!("#{tag}");
        }
    }

    let mut sink = DirSink::new(&cli.output);
    output::write_report(&report, &mut sink)?;

    println!("Test data JSON file generated successfully.");
    println!("Orphan test data JSON file generated successfully.");
    println!("{}", report.summary());
    Ok(())
}

fn parse_filters(raw: &[String]) -> Result<Vec<TagFilter>> {
    raw.iter()
        .map(|f| TagFilter::parse(f).with_context(|| format!("invalid tag filter: {f}")))
        .collect()
}

/// Level from -q/-v, overridable through `TESTGEN_LOG`.
fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TESTGEN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_parse() {
        let filters = parse_filters(&["smoke".into(), "!team:ios".into()]).unwrap();
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn bad_filter_rejected() {
        let err = parse_filters(&["a:b:c".into()]).unwrap_err();
        assert!(err.to_string().contains("invalid tag filter: a:b:c"));
    }

    #[test]
    fn single_dash_path_normalized() {
        let args = ["testgen", "-path", "App"].map(OsString::from);
        let cli = Cli::parse_from(normalize_args(args));
        assert_eq!(cli.path.as_deref(), Some("App"));

        let args = ["testgen", "-path=Other"].map(OsString::from);
        let cli = Cli::parse_from(normalize_args(args));
        assert_eq!(cli.path.as_deref(), Some("Other"));

        let normalized = normalize_args(["-path", "-path=App", "-o"].map(OsString::from));
        assert_eq!(normalized, ["--path", "--path=App", "-o"].map(OsString::from));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
