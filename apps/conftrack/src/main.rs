//! Conftrack CLI binary entry point.
//! Resolves configuration, runs the report pipeline, and prints results.

use chrono::Utc;
use clap::Parser;
use conftrack::catalog::FeatureCatalog;
use conftrack::categorize::categorize;
use conftrack::cli::{Cli, Commands};
use conftrack::config::{self, CliOverrides};
use conftrack::ledger::load_ledger;
use conftrack::render::{self, OutputFiles, RenderContext};
use conftrack::report::CategorizedReport;
use conftrack::utils::{display_path, error_prefix, info_prefix, note_prefix};
use conftrack::version::read_version;
use conftrack::{output, Result};
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let res = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Categorize { paths, output } => run_categorize(paths, output.as_deref()),
        Commands::Report {
            repo_root,
            ledger,
            out_dir,
            write,
            output,
            max_rows,
            catalog,
        } => run_report(&CliOverrides {
            repo_root: repo_root.as_deref(),
            ledger: ledger.as_deref(),
            out_dir: out_dir.as_deref(),
            output: output.as_deref(),
            write: write.then_some(true),
            max_rows,
            catalog: catalog.as_deref(),
        }),
    };
    if let Err(e) = res {
        eprintln!("{} {}", error_prefix(), e);
        std::process::exit(e.exit_code());
    }
}

fn run_categorize(paths: Vec<String>, mode: Option<&str>) -> Result<()> {
    let mode = mode.unwrap_or("human");
    config::validate_output(mode, Path::new("."))?;
    let pairs: Vec<(String, String)> = paths
        .into_iter()
        .map(|p| {
            let category = categorize(&p);
            (p, category)
        })
        .collect();
    output::print_categories(&pairs, mode);
    Ok(())
}

fn run_report(cli: &CliOverrides<'_>) -> Result<()> {
    let eff = config::resolve_effective(cli)?;
    let human = eff.output != "json";
    // Friendly note if no conftrack config was found
    if human && matches!(config::load_config(&eff.repo_root), Ok(None)) {
        eprintln!(
            "{} No conftrack.toml found; using defaults.",
            note_prefix()
        );
    }

    let ledger = load_ledger(&eff.ledger)?;
    if human {
        eprintln!(
            "{} Ledger: {} ({} records)",
            info_prefix(),
            display_path(&eff.ledger, &eff.repo_root),
            ledger.len()
        );
        let stats = ledger.stats();
        if stats.skipped > 0 {
            eprintln!(
                "{} {} ledger line(s) skipped as unrecognized (RUST_LOG=debug lists them).",
                note_prefix(),
                stats.skipped
            );
        }
        if ledger.is_empty() {
            eprintln!("{} Ledger has no records; reports will be empty.", note_prefix());
        }
    }

    let catalog = FeatureCatalog::load_or_builtin(eff.catalog.as_deref());
    let version = read_version(&eff.version_file, &eff.version_key);
    let report = CategorizedReport::build(&ledger, &catalog);
    let ctx = RenderContext {
        title: eff.title.clone(),
        generated: Utc::now(),
        version,
        max_rows: eff.max_rows,
    };

    if eff.write {
        let rendered = render::render_all(&report, &ctx)?;
        let files = OutputFiles {
            markdown: eff.markdown_file.clone(),
            json: eff.json_file.clone(),
            html: eff.html_file.clone(),
        };
        let written: Vec<String> = render::write_outputs(&rendered, &eff.out_dir, &files)?
            .iter()
            .map(|p| display_path(p, &eff.repo_root))
            .collect();
        output::print_report(&report, &ctx, &eff.output, &written, None);
    } else {
        let markdown = render::markdown::render_markdown(&report, &ctx);
        output::print_report(&report, &ctx, &eff.output, &[], Some(&markdown));
    }
    Ok(())
}
