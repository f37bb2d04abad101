//! Markdown report (`FEATURES.md`).

use std::cmp::Ordering;
use std::fmt::Write;

use super::{format_counts, status_badge, RenderContext};
use crate::catalog::MODERN_EDITIONS;
use crate::models::Status;
use crate::report::{CategorizedReport, CategoryGroup};

/// Render the full Markdown document.
pub fn render_markdown(report: &CategorizedReport, ctx: &RenderContext) -> String {
    let mut output = String::new();
    let totals = report.totals();

    let _ = writeln!(output, "# {}", ctx.title);
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "*Auto-generated from test262 results on {} (engine version {})*",
        ctx.generated.format("%Y-%m-%d %H:%M UTC"),
        ctx.version
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "{} test suites tracked ({} disabled). {} of {} tests pass ({:.1}%).",
        totals.suites, totals.disabled, totals.passed_tests, totals.total_tests, totals.pass_rate
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Feature Support Legend");
    let _ = writeln!(output);
    for status in Status::ALL {
        let _ = writeln!(output, "- {} **{}**", badge_icon(status), status.legend());
    }
    let _ = writeln!(output);

    append_edition_summary(&mut output, report);
    append_edition_tables(&mut output, report);
    append_category_summary(&mut output, report);

    for (name, group) in report.ranked_categories() {
        append_category_table(&mut output, name, group, ctx.max_rows);
    }

    append_feature_lists(&mut output, report);

    let _ = writeln!(output, "## Maintenance");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "This file is generated from the test262 results ledger. \
         Regenerate it with `conftrack report --write` after updating the ledger."
    );
    output
}

fn badge_icon(status: Status) -> &'static str {
    status_badge(status)
        .split_whitespace()
        .next()
        .unwrap_or_default()
}

fn append_edition_summary(output: &mut String, report: &CategorizedReport) {
    if report.editions().is_empty() {
        return;
    }
    let _ = writeln!(output, "## Summary by ECMAScript Version");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "| Version | Full | Mostly | Partial | Limited | None | Average |"
    );
    let _ = writeln!(
        output,
        "|---------|------|--------|---------|---------|------|---------|"
    );
    for ed in report.editions() {
        let _ = write!(output, "| {} |", ed.edition);
        for status in Status::ALL {
            let _ = write!(output, " {} |", ed.statuses.get(status));
        }
        let _ = writeln!(output, " {:.1}% |", ed.avg_pass_rate);
    }
    let _ = writeln!(output);
}

/// One table per edition, highest pass rate first.
fn append_edition_tables(output: &mut String, report: &CategorizedReport) {
    for ed in report.editions() {
        let _ = writeln!(output, "## {} Features", ed.edition);
        let _ = writeln!(output);
        let _ = writeln!(output, "| Feature | Status | Pass Rate | Tests |");
        let _ = writeln!(output, "|---------|--------|-----------|-------|");
        let mut features: Vec<_> = ed.features.iter().collect();
        features.sort_by(|a, b| {
            b.pass_rate
                .partial_cmp(&a.pass_rate)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        for f in features {
            let status = if f.not_found {
                format!("{} (not found)", status_badge(f.status))
            } else if f.disabled {
                format!("{} (disabled)", status_badge(f.status))
            } else {
                status_badge(f.status).to_string()
            };
            let _ = writeln!(
                output,
                "| {} | {} | {:.1}% | {} |",
                f.name,
                status,
                f.pass_rate,
                format_counts(f.passed, f.total)
            );
        }
        let _ = writeln!(output);
    }
}

fn append_category_summary(output: &mut String, report: &CategorizedReport) {
    let _ = writeln!(output, "## Summary by Category");
    let _ = writeln!(output);
    let _ = writeln!(output, "| Category | Suites | Passing | Pass Rate | Status |");
    let _ = writeln!(output, "|----------|--------|---------|-----------|--------|");
    for (name, group) in report.ranked_categories() {
        let stats = &group.stats;
        let _ = writeln!(
            output,
            "| {} | {} | {} | {:.1}% | {} |",
            name,
            stats.suites,
            format_counts(stats.passed_tests, stats.total_tests),
            stats.pass_rate,
            status_badge(Status::from_pass_rate(stats.pass_rate))
        );
    }
    let _ = writeln!(output);
}

/// One table per category. `max_rows == 0` disables truncation.
fn append_category_table(output: &mut String, name: &str, group: &CategoryGroup, max_rows: usize) {
    let _ = writeln!(output, "## {name}");
    let _ = writeln!(output);
    let _ = writeln!(output, "| Test Suite | Pass Rate | Tests | Status |");
    let _ = writeln!(output, "|------------|-----------|-------|--------|");
    let ranked = group.ranked();
    let shown = if max_rows == 0 {
        ranked.len()
    } else {
        max_rows.min(ranked.len())
    };
    for rec in &ranked[..shown] {
        let status = if rec.is_disabled() {
            format!("{} (disabled)", status_badge(rec.status()))
        } else {
            status_badge(rec.status()).to_string()
        };
        let _ = writeln!(
            output,
            "| `{}` | {:.1}% | {} | {} |",
            rec.path(),
            rec.pass_rate(),
            format_counts(rec.passed(), rec.total()),
            status
        );
    }
    let hidden = ranked.len() - shown;
    if hidden > 0 {
        let _ = writeln!(output, "| *… and {hidden} more* | | | |");
    }
    let _ = writeln!(output);
}

fn append_feature_lists(output: &mut String, report: &CategorizedReport) {
    let working = report.working_features(MODERN_EDITIONS);
    if !working.is_empty() {
        let _ = writeln!(output, "## Fully Working Modern Features");
        let _ = writeln!(output);
        append_list(output, &working);
    }
    let missing = report.unsupported_features();
    if !missing.is_empty() {
        let _ = writeln!(output, "## Not Supported Features");
        let _ = writeln!(output);
        append_list(output, &missing);
    }
}

fn append_list(output: &mut String, items: &[(&str, Vec<&str>)]) {
    for (edition, names) in items {
        let _ = writeln!(output, "- **{}**: {}", edition, names.join(", "));
    }
    let _ = writeln!(output);
}
