//! Console output for the report and categorize commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form carries the
//! same summary object that the JSON export embeds.

use crate::render::RenderContext;
use crate::report::CategorizedReport;
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Lines of Markdown shown when the report is not written.
pub const PREVIEW_LINES: usize = 50;

/// Print the run summary, plus a Markdown preview when nothing was written.
pub fn print_report(
    report: &CategorizedReport,
    ctx: &RenderContext,
    output: &str,
    written: &[String],
    preview: Option<&str>,
) {
    match output {
        "json" => {
            let out = compose_summary_json(report, ctx, written);
            match serde_json::to_string_pretty(&out) {
                Ok(s) => println!("{s}"),
                Err(e) => log::error!("failed to serialize summary: {e}"),
            }
        }
        _ => {
            let color = use_colors(output);
            if let Some(md) = preview {
                let header = format!("--- Markdown preview (first {PREVIEW_LINES} lines)");
                if color {
                    println!("{}", header.cyan().bold());
                } else {
                    println!("{header}");
                }
                println!("{}", preview_lines(md, PREVIEW_LINES));
            }
            for path in written {
                if color {
                    println!("{} {}", "✏️  wrote:".green().bold(), path.bold());
                } else {
                    println!("✏️  wrote: {path}");
                }
            }
            for line in summary_lines(report, ctx) {
                if color {
                    println!("{}", line.bold());
                } else {
                    println!("{line}");
                }
            }
        }
    }
}

/// Print `path → category` pairs.
pub fn print_categories(pairs: &[(String, String)], output: &str) {
    match output {
        "json" => {
            let out = compose_categories_json(pairs);
            match serde_json::to_string_pretty(&out) {
                Ok(s) => println!("{s}"),
                Err(e) => log::error!("failed to serialize categories: {e}"),
            }
        }
        _ => {
            let color = use_colors(output);
            for (path, category) in pairs {
                if color {
                    println!("{} {} {}", path, "→".bright_black(), category.bold());
                } else {
                    println!("{path} → {category}");
                }
            }
        }
    }
}

fn summary_lines(report: &CategorizedReport, ctx: &RenderContext) -> Vec<String> {
    let t = report.totals();
    let f = report.features();
    vec![
        format!(
            "— Summary — suites={} disabled={} tests={} passed={} rate={:.1}%",
            t.suites, t.disabled, t.total_tests, t.passed_tests, t.pass_rate
        ),
        format!(
            "— Features — total={} full={} partial={} none={} (engine {})",
            f.total_features, f.fully_supported, f.partially_supported, f.not_supported, ctx.version
        ),
    ]
}

/// First `n` lines of `text`, with a marker when more follow.
pub fn preview_lines(text: &str, n: usize) -> String {
    let total = text.lines().count();
    let mut out = text.lines().take(n).collect::<Vec<_>>().join("\n");
    if total > n {
        out.push_str(&format!("\n… ({} more lines)", total - n));
    }
    out
}

/// Compose summary JSON object (pure) for testing/snapshot purposes.
pub fn compose_summary_json(
    report: &CategorizedReport,
    ctx: &RenderContext,
    written: &[String],
) -> JsonVal {
    json!({
        "generated": ctx.generated.to_rfc3339(),
        "version": ctx.version,
        "summary": {
            "suites": report.totals().suites,
            "disabled": report.totals().disabled,
            "total_tests": report.totals().total_tests,
            "passed_tests": report.totals().passed_tests,
            "pass_rate": report.totals().pass_rate,
            "features": report.features(),
            "parse": report.parse_stats(),
        },
        "written": written,
    })
}

/// Compose categorize JSON object (pure) for testing/snapshot purposes.
pub fn compose_categories_json(pairs: &[(String, String)]) -> JsonVal {
    let items: Vec<_> = pairs
        .iter()
        .map(|(path, category)| json!({"path": path, "category": category}))
        .collect();
    json!({"results": items})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FeatureCatalog;
    use crate::ledger::LedgerParser;

    #[test]
    fn test_compose_summary_json_shape() {
        let ledger = LedgerParser::new().parse("built-ins/Set 1/4 (25.00%)\n# note\nbad line here\n");
        let report = CategorizedReport::build(&ledger, &FeatureCatalog::parse(""));
        let ctx = RenderContext::new("t", "2.0");
        let out = compose_summary_json(&report, &ctx, &["FEATURES.md".to_string()]);
        assert_eq!(out["version"], "2.0");
        assert_eq!(out["summary"]["passed_tests"], 3);
        assert_eq!(out["summary"]["pass_rate"], 75.0);
        assert_eq!(out["summary"]["parse"]["skipped"], 1);
        assert_eq!(out["summary"]["parse"]["ignored"], 1);
        assert_eq!(out["written"][0], "FEATURES.md");
    }

    #[test]
    fn test_preview_lines_truncates() {
        let text = "a\nb\nc\nd\n";
        assert_eq!(preview_lines(text, 2), "a\nb\n… (2 more lines)");
        assert_eq!(preview_lines(text, 10), "a\nb\nc\nd");
    }

    #[test]
    fn test_compose_categories_json() {
        let pairs = vec![("intl402/Collator".to_string(), "Internationalization (ECMA-402)".to_string())];
        let out = compose_categories_json(&pairs);
        assert_eq!(out["results"][0]["category"], "Internationalization (ECMA-402)");
    }
}
