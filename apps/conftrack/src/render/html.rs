//! Standalone HTML dashboard (`features.html`).
//!
//! One self-contained page: stat cards, a search box that filters categories
//! by name, and a collapsible table per category. The JSON export is embedded
//! as `application/json` and exposed to scripts as `window.conftrackData`.

use std::fmt::Write;

use super::json::render_json;
use super::{format_counts, RenderContext};
use crate::error::Result;
use crate::report::{CategorizedReport, CategoryGroup};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
header { background: #24292f; color: #fff; padding: 24px 32px; }
header h1 { margin: 0 0 4px 0; font-size: 1.6em; }
header p { margin: 0; opacity: 0.8; }
main { max-width: 1100px; margin: 0 auto; padding: 24px 32px; }
.cards { display: flex; flex-wrap: wrap; gap: 12px; margin-bottom: 24px; }
.card { background: #fff; border-radius: 6px; padding: 16px 20px; min-width: 140px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.card .value { font-size: 1.6em; font-weight: 600; }
.card .label { color: #666; font-size: 0.9em; }
#search { width: 100%; padding: 10px; font-size: 1em; border: 1px solid #ccc; border-radius: 6px; margin-bottom: 16px; box-sizing: border-box; }
details.category { background: #fff; border-radius: 6px; margin-bottom: 10px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
details.category summary { cursor: pointer; padding: 12px 16px; display: flex; justify-content: space-between; align-items: center; }
.bar { width: 160px; height: 8px; background: #e1e4e8; border-radius: 4px; overflow: hidden; display: inline-block; margin-left: 12px; }
.bar span { display: block; height: 100%; background: #2da44e; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 6px 16px; border-top: 1px solid #eee; font-size: 0.92em; }
td.path { font-family: ui-monospace, Menlo, monospace; }
.status { padding: 2px 8px; border-radius: 10px; font-size: 0.85em; }
.status.full { background: #dafbe1; color: #116329; }
.status.mostly { background: #ddf4ff; color: #0550ae; }
.status.partial { background: #fff8c5; color: #7d4e00; }
.status.limited { background: #ffebd5; color: #953800; }
.status.none { background: #ffebe9; color: #a40e26; }
footer { color: #777; font-size: 0.85em; padding: 24px 32px; text-align: center; }
"#;

// Matches on category names only; test paths inside the tables are ignored.
const SCRIPT: &str = r#"
document.getElementById('search').addEventListener('input', function (e) {
  var q = e.target.value.trim().toLowerCase();
  document.querySelectorAll('details.category').forEach(function (el) {
    var name = el.getAttribute('data-name');
    el.style.display = (q === '' || name.indexOf(q) !== -1) ? '' : 'none';
  });
});
window.conftrackData = JSON.parse(document.getElementById('conftrack-data').textContent);
"#;

/// Render the HTML dashboard.
pub fn render_html(report: &CategorizedReport, ctx: &RenderContext) -> Result<String> {
    let data = embed_json(&render_json(report, ctx)?);
    let mut output = String::new();
    let totals = report.totals();
    let title = escape_html(&ctx.title);

    let _ = writeln!(output, "<!DOCTYPE html>");
    let _ = writeln!(output, "<html lang=\"en\">");
    let _ = writeln!(output, "<head>");
    let _ = writeln!(output, "<meta charset=\"utf-8\">");
    let _ = writeln!(
        output,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    );
    let _ = writeln!(output, "<title>{title}</title>");
    let _ = writeln!(output, "<style>{STYLE}</style>");
    let _ = writeln!(output, "</head>");
    let _ = writeln!(output, "<body>");
    let _ = writeln!(output, "<header>");
    let _ = writeln!(output, "<h1>{title}</h1>");
    let _ = writeln!(
        output,
        "<p>Engine version {} &middot; generated {}</p>",
        escape_html(&ctx.version),
        ctx.generated.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output, "</header>");
    let _ = writeln!(output, "<main>");

    let _ = writeln!(output, "<section class=\"cards\">");
    append_card(&mut output, &totals.suites.to_string(), "Test suites");
    append_card(&mut output, &totals.total_tests.to_string(), "Tests");
    append_card(&mut output, &totals.passed_tests.to_string(), "Passing");
    append_card(&mut output, &format!("{:.1}%", totals.pass_rate), "Pass rate");
    append_card(&mut output, &totals.disabled.to_string(), "Disabled");
    append_card(
        &mut output,
        &report.features().fully_supported.to_string(),
        "Features fully supported",
    );
    let _ = writeln!(output, "</section>");

    let _ = writeln!(
        output,
        "<input id=\"search\" type=\"search\" placeholder=\"Filter categories...\">"
    );
    for (name, group) in report.ranked_categories() {
        append_category(&mut output, name, group);
    }

    let _ = writeln!(output, "</main>");
    let _ = writeln!(
        output,
        "<footer>Generated by conftrack from the test262 results ledger.</footer>"
    );
    let _ = writeln!(
        output,
        "<script type=\"application/json\" id=\"conftrack-data\">{data}</script>"
    );
    let _ = writeln!(output, "<script>{SCRIPT}</script>");
    let _ = writeln!(output, "</body>");
    let _ = writeln!(output, "</html>");
    Ok(output)
}

/// Make JSON text safe inside a `<script>` element. `<\/` is a valid JSON
/// escape for `</`, so the payload still parses to the same value.
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn append_card(output: &mut String, value: &str, label: &str) {
    let _ = writeln!(
        output,
        "<div class=\"card\"><div class=\"value\">{}</div><div class=\"label\">{}</div></div>",
        escape_html(value),
        escape_html(label)
    );
}

fn append_category(output: &mut String, name: &str, group: &CategoryGroup) {
    let stats = &group.stats;
    let _ = writeln!(
        output,
        "<details class=\"category\" data-name=\"{}\">",
        escape_html(&name.to_lowercase())
    );
    let _ = writeln!(
        output,
        "<summary><strong>{}</strong><span>{} suites &middot; {:.1}%<span class=\"bar\"><span style=\"width: {:.1}%\"></span></span></span></summary>",
        escape_html(name),
        stats.suites,
        stats.pass_rate,
        stats.pass_rate
    );
    let _ = writeln!(output, "<table>");
    let _ = writeln!(
        output,
        "<thead><tr><th>Test Suite</th><th>Pass Rate</th><th>Tests</th><th>Status</th></tr></thead>"
    );
    let _ = writeln!(output, "<tbody>");
    for rec in group.ranked() {
        let status = rec.status();
        let label = if rec.is_disabled() {
            format!("{} (disabled)", status.as_str())
        } else {
            status.as_str().to_string()
        };
        let _ = writeln!(
            output,
            "<tr><td class=\"path\">{}</td><td>{:.1}%</td><td>{}</td><td><span class=\"status {}\">{}</span></td></tr>",
            escape_html(rec.path()),
            rec.pass_rate(),
            format_counts(rec.passed(), rec.total()),
            status.css_class(),
            label
        );
    }
    let _ = writeln!(output, "</tbody>");
    let _ = writeln!(output, "</table>");
    let _ = writeln!(output, "</details>");
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FeatureCatalog;
    use crate::ledger::LedgerParser;
    use crate::models::Status;
    use chrono::{TimeZone, Utc};

    fn render(text: &str, title: &str) -> String {
        let report = CategorizedReport::build(&LedgerParser::new().parse(text), &FeatureCatalog::parse(""));
        let mut ctx = RenderContext::new(title, "1.8.1");
        ctx.generated = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        render_html(&report, &ctx).unwrap()
    }

    #[test]
    fn test_page_structure() {
        let html = render("built-ins/Map 4/40 (10.00%)\n~intl402/Collator\n", "Support");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Support</title>"));
        assert!(html.contains("<details class=\"category\" data-name=\"collections\">"));
        assert!(html.contains("data-name=\"internationalization (ecma-402)\""));
        assert!(html.contains("<td class=\"path\">built-ins/Map</td><td>90.0%</td><td>36/40</td>"));
        assert!(html.contains("<span class=\"status none\">None (disabled)</span>"));
        assert!(html.contains("id=\"search\""));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = render("", "A <b>&</b> B");
        assert!(html.contains("<title>A &lt;b&gt;&amp;&lt;/b&gt; B</title>"));
    }

    #[test]
    fn test_json_export_is_embedded() {
        let html = render("built-ins/Map 4/40 (10.00%)\n", "Support");
        assert!(html.contains("window.conftrackData"));
        let start = html.find("<script type=\"application/json\" id=\"conftrack-data\">").unwrap();
        let body = &html[start..];
        let body = &body[body.find('>').unwrap() + 1..body.find("</script>").unwrap()];
        let data: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(data["version"], "1.8.1");
        assert_eq!(data["categories"]["Collections"]["tests"]["built-ins/Map"]["passed"], 36);
    }

    #[test]
    fn test_embedded_json_cannot_close_the_script() {
        let escaped = embed_json("{\"v\": \"</script><b>\"}");
        assert!(!escaped.contains("</"));
        let parsed: serde_json::Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(parsed["v"], "</script><b>");
    }

    #[test]
    fn test_every_status_has_a_style() {
        for status in Status::ALL {
            assert!(STYLE.contains(&format!(".status.{}", status.css_class())));
        }
    }
}
