//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "conftrack",
    version,
    about = "Conformance feature tracker for test262 results",
    long_about = "Conftrack reads a test262 results ledger, groups every suite into a feature category, and renders Markdown, JSON, and HTML reports.\n\nConfiguration precedence: CLI > conftrack.toml > defaults.",
    after_help = "Examples:\n  conftrack report\n  conftrack report --ledger tests/testsrc/test262.properties --write\n  conftrack report --output json --max-rows 10\n  conftrack categorize built-ins/Array/from language/expressions/class",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current conftrack version."
    )]
    Version,
    /// Build the feature support report
    #[command(
        about = "Generate feature reports",
        long_about = "Parse the results ledger and build the categorized report. Without --write, a Markdown preview and the summary are printed; with --write, FEATURES.md, features.json, and features.html are written.",
        after_help = "Examples:\n  conftrack report --write\n  conftrack report --out-dir docs --write --output json"
    )]
    Report {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Ledger file or glob, relative to the repo root")]
        ledger: Option<String>,
        #[arg(long, help = "Directory for written reports (default: repo root)")]
        out_dir: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write report files instead of previewing")]
        write: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Rows per category table in Markdown; 0 shows all (default: 25)")]
        max_rows: Option<usize>,
        #[arg(long, help = "Feature catalog file (EDITION|Feature|path lines)")]
        catalog: Option<String>,
    },
    /// Show the category of test paths
    #[command(
        about = "Categorize paths",
        long_about = "Print the category each test262 path is assigned to.",
        after_help = "Examples:\n  conftrack categorize built-ins/Map/prototype/set intl402/Collator"
    )]
    Categorize {
        #[arg(required = true, help = "Test262 suite paths")]
        paths: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
