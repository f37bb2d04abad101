//! Engine version lookup from a `key=value` properties file
//! (`gradle.properties` by default).

use std::fs;
use std::path::Path;

/// Substituted when the version source is missing or has no matching key.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Read `key` from the properties file at `path`. Never fails.
pub fn read_version(path: &Path, key: &str) -> String {
    let text = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("version source {} unavailable: {e}", path.display());
            return UNKNOWN_VERSION.to_string();
        }
    };
    find_property(&text, key).unwrap_or_else(|| {
        log::warn!("no `{key}` entry in {}", path.display());
        UNKNOWN_VERSION.to_string()
    })
}

fn find_property(text: &str, key: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.starts_with('#') && !l.starts_with('!'))
        .filter_map(|l| l.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
