//! JSON export. Field names are part of the public contract: downstream
//! consumers read this file across regenerations.

use super::RenderContext;
use crate::error::Result;
use crate::report::CategorizedReport;
use serde_json::{json, Map, Value as JsonVal};

/// Pretty-printed JSON document for the report.
pub fn render_json(report: &CategorizedReport, ctx: &RenderContext) -> Result<String> {
    Ok(serde_json::to_string_pretty(&compose_report_json(report, ctx))?)
}

/// Compose the JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &CategorizedReport, ctx: &RenderContext) -> JsonVal {
    let totals = report.totals();
    let summary = json!({
        "suites": totals.suites,
        "disabled": totals.disabled,
        "total_tests": totals.total_tests,
        "passed_tests": totals.passed_tests,
        "pass_rate": totals.pass_rate,
        "statuses": totals.statuses,
        "features": report.features(),
        "parse": report.parse_stats(),
    });

    let mut categories = Map::new();
    for (name, group) in report.categories() {
        let mut tests = Map::new();
        for (path, rec) in &group.tests {
            tests.insert(
                path.clone(),
                json!({
                    "passed": rec.passed(),
                    "total": rec.total(),
                    "pass_rate": rec.pass_rate(),
                    "disabled": rec.is_disabled(),
                    "status": rec.status(),
                }),
            );
        }
        categories.insert(
            name.clone(),
            json!({"stats": group.stats, "tests": tests}),
        );
    }

    let mut features = Map::new();
    for ed in report.editions() {
        let mut items = Map::new();
        for f in &ed.features {
            items.insert(
                f.name.clone(),
                json!({
                    "path": f.path,
                    "passed": f.passed,
                    "total": f.total,
                    "pass_rate": f.pass_rate,
                    "disabled": f.disabled,
                    "not_found": f.not_found,
                    "status": f.status,
                }),
            );
        }
        features.insert(
            ed.edition.clone(),
            json!({
                "statuses": ed.statuses,
                "avg_pass_rate": ed.avg_pass_rate,
                "features": items,
            }),
        );
    }

    json!({
        "generated": ctx.generated.to_rfc3339(),
        "version": ctx.version,
        "summary": summary,
        "categories": categories,
        "features": features,
    })
}
