//! Report renderers: Markdown, JSON, and HTML.
//!
//! Every renderer reads the same immutable `CategorizedReport` plus a
//! `RenderContext`; none of them touch the filesystem.

pub mod html;
pub mod json;
pub mod markdown;

use crate::error::{Error, Result};
use crate::models::Status;
use crate::report::CategorizedReport;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of rows shown per category table in Markdown.
pub const DEFAULT_MAX_ROWS: usize = 25;

#[derive(Debug, Clone)]
/// Run metadata shared by all renderers.
pub struct RenderContext {
    pub title: String,
    pub generated: DateTime<Utc>,
    pub version: String,
    pub max_rows: usize,
}

impl RenderContext {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated: Utc::now(),
            version: version.into(),
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// All three outputs for one run.
pub struct Rendered {
    pub markdown: String,
    pub json: String,
    pub html: String,
}

/// Render every output. The renderers are independent, so they run on the
/// rayon pool over a shared reference to the report.
pub fn render_all(report: &CategorizedReport, ctx: &RenderContext) -> Result<Rendered> {
    let (markdown, (json, html)) = rayon::join(
        || markdown::render_markdown(report, ctx),
        || {
            rayon::join(
                || json::render_json(report, ctx),
                || html::render_html(report, ctx),
            )
        },
    );
    Ok(Rendered {
        markdown,
        json: json?,
        html: html?,
    })
}

/// File names for the three outputs, relative to the output directory.
#[derive(Debug, Clone)]
pub struct OutputFiles {
    pub markdown: String,
    pub json: String,
    pub html: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            markdown: "FEATURES.md".to_string(),
            json: "features.json".to_string(),
            html: "features.html".to_string(),
        }
    }
}

/// Write all outputs under `out_dir`, creating directories as needed.
/// Returns the written paths in Markdown, JSON, HTML order.
pub fn write_outputs(rendered: &Rendered, out_dir: &Path, files: &OutputFiles) -> Result<Vec<PathBuf>> {
    let targets = [
        (&files.markdown, &rendered.markdown),
        (&files.json, &rendered.json),
        (&files.html, &rendered.html),
    ];
    let mut written = Vec::with_capacity(targets.len());
    for (name, body) in targets {
        let path = out_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, body).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Short status marker used in tables.
pub fn status_badge(status: Status) -> &'static str {
    match status {
        Status::Full => "🟢 Full",
        Status::Mostly => "🔵 Mostly",
        Status::Partial => "🟡 Partial",
        Status::Limited => "🟠 Limited",
        Status::None => "🔴 None",
    }
}

/// `passed/total`, or `N/A` for suites without counts.
pub fn format_counts(passed: u64, total: u64) -> String {
    if total > 0 {
        format!("{passed}/{total}")
    } else {
        "N/A".to_string()
    }
}
