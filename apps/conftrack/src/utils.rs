//! Console helpers shared by the binary and the printers.

use owo_colors::OwoColorize;
use std::path::Path;

/// Whether ANSI colors should be emitted. JSON output and `NO_COLOR` disable
/// them.
pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(tag: &str, paint: fn(&str) -> String) -> String {
    if use_colors("human") {
        paint(tag)
    } else {
        tag.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("⟦error⟧", |t| t.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("⟦note⟧", |t| t.yellow().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("⟦info⟧", |t| t.blue().bold().to_string())
}

/// `path` relative to `base` when possible, for compact display.
pub fn display_path(path: &Path, base: &Path) -> String {
    pathdiff::diff_paths(path, base)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}
