//! Configuration discovery and effective settings resolution.
//!
//! Conftrack reads `conftrack.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `ledger`: first existing of `tests/testsrc/test262.properties`,
//!   `testsrc/test262.properties`
//! - `out_dir`: repository root
//! - `output`: `human`
//! - `report.markdown|json|html`: `FEATURES.md`, `features.json`, `features.html`
//! - `report.max_rows`: 25
//! - `report.title`: `ECMAScript Feature Support`
//! - `version.file|key`: `gradle.properties`, `version`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::render::DEFAULT_MAX_ROWS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["conftrack.toml", "conftrack.yaml", "conftrack.yml"];
pub const DEFAULT_LEDGERS: [&str; 2] = [
    "tests/testsrc/test262.properties",
    "testsrc/test262.properties",
];
pub const DEFAULT_TITLE: &str = "ECMAScript Feature Support";

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Output section under `[report]`.
pub struct ReportCfg {
    pub markdown: Option<String>,
    pub json: Option<String>,
    pub html: Option<String>,
    pub max_rows: Option<usize>,
    pub title: Option<String>,
    pub write: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Engine version source under `[version]`.
pub struct VersionCfg {
    pub file: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CatalogCfg {
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `conftrack.toml|yaml`.
pub struct ConftrackConfig {
    pub ledger: Option<String>,
    pub out_dir: Option<String>,
    pub output: Option<String>,
    pub report: Option<ReportCfg>,
    pub version: Option<VersionCfg>,
    pub catalog: Option<CatalogCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line; `None` defers to config/defaults.
pub struct CliOverrides<'a> {
    pub repo_root: Option<&'a str>,
    pub ledger: Option<&'a str>,
    pub out_dir: Option<&'a str>,
    pub output: Option<&'a str>,
    pub write: Option<bool>,
    pub max_rows: Option<usize>,
    pub catalog: Option<&'a str>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub ledger: PathBuf,
    pub out_dir: PathBuf,
    pub output: String,
    pub write: bool,
    pub max_rows: usize,
    pub title: String,
    pub markdown_file: String,
    pub json_file: String,
    pub html_file: String,
    pub version_file: PathBuf,
    pub version_key: String,
    pub catalog: Option<PathBuf>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `conftrack.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ConftrackConfig` from the first config file present in `root`.
///
/// A present but unreadable or malformed file is an error; a missing one is
/// `Ok(None)`.
pub fn load_config(root: &Path) -> Result<Option<ConftrackConfig>> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let text = fs::read_to_string(&path).map_err(|e| Error::Config {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<ConftrackConfig>(&text).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<ConftrackConfig>(&text).map_err(|e| e.to_string())
        };
        return parsed
            .map(Some)
            .map_err(|reason| Error::Config { path, reason });
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Result<Effective> {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root)?.unwrap_or_default();
    let report = cfg.report.unwrap_or_default();
    let version = cfg.version.unwrap_or_default();

    let output = cli
        .output
        .map(str::to_string)
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    validate_output(&output, &repo_root)?;

    let ledger_patterns: Vec<String> = match cli.ledger.map(str::to_string).or(cfg.ledger) {
        Some(p) => vec![p],
        None => DEFAULT_LEDGERS.iter().map(|s| s.to_string()).collect(),
    };
    let ledger = resolve_ledger(&repo_root, &ledger_patterns)?;

    let out_dir = cli
        .out_dir
        .map(str::to_string)
        .or(cfg.out_dir)
        .map(|d| repo_root.join(d))
        .unwrap_or_else(|| repo_root.clone());

    let catalog = cli
        .catalog
        .map(str::to_string)
        .or(cfg.catalog.and_then(|c| c.file))
        .map(|f| repo_root.join(f));

    Ok(Effective {
        ledger,
        out_dir,
        output,
        write: cli.write.or(report.write).unwrap_or(false),
        max_rows: cli.max_rows.or(report.max_rows).unwrap_or(DEFAULT_MAX_ROWS),
        title: report.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        markdown_file: report.markdown.unwrap_or_else(|| "FEATURES.md".to_string()),
        json_file: report.json.unwrap_or_else(|| "features.json".to_string()),
        html_file: report.html.unwrap_or_else(|| "features.html".to_string()),
        version_file: repo_root.join(version.file.as_deref().unwrap_or("gradle.properties")),
        version_key: version.key.unwrap_or_else(|| "version".to_string()),
        catalog,
        repo_root,
    })
}

/// Output modes understood by every command.
pub const OUTPUT_MODES: [&str; 2] = ["human", "json"];

/// Reject output modes other than `human` and `json`. `origin` names where
/// the value came from (the repo root for CLI/config values).
pub fn validate_output(output: &str, origin: &Path) -> Result<()> {
    if OUTPUT_MODES.contains(&output) {
        return Ok(());
    }
    Err(Error::Config {
        path: origin.to_path_buf(),
        reason: format!("unsupported output `{output}` (expected human|json)"),
    })
}

/// Pick the ledger file from `patterns`, relative to `root`.
///
/// Literal paths are returned as given (a missing file is reported when it is
/// read). Glob patterns resolve to their first match in sorted order. With
/// several candidates the first one that exists wins.
pub fn resolve_ledger(root: &Path, patterns: &[String]) -> Result<PathBuf> {
    if let [only] = patterns {
        if !is_glob(only) {
            return Ok(root.join(only));
        }
    }
    for pat in patterns {
        let full = root.join(pat);
        if !is_glob(pat) {
            if full.is_file() {
                return Ok(full);
            }
            continue;
        }
        let Ok(paths) = glob::glob(&full.to_string_lossy()) else {
            log::warn!("invalid ledger pattern: {pat}");
            continue;
        };
        let mut hits: Vec<PathBuf> = paths.flatten().filter(|p| p.is_file()).collect();
        hits.sort();
        if let Some(first) = hits.into_iter().next() {
            return Ok(first);
        }
    }
    Err(Error::LedgerNotFound {
        patterns: patterns.join(", "),
    })
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn touch_ledger(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, "built-ins/Array 0/1 (0.00%)\n").unwrap();
    }

    fn at(root: &Path) -> CliOverrides<'_> {
        CliOverrides {
            repo_root: root.to_str(),
            ..Default::default()
        }
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch_ledger(root, "data/results.properties");
        let mut f = fs::File::create(root.join("conftrack.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
ledger = "data/results.properties"
out_dir = "docs"
output = "json"
[report]
write = true
max_rows = 10
title = "Engine Conformance"
[version]
file = "VERSION.properties"
            "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(&at(root)).unwrap();
        assert_eq!(eff.ledger, root.join("data/results.properties"));
        assert_eq!(eff.out_dir, root.join("docs"));
        assert_eq!(eff.output, "json");
        assert!(eff.write);
        assert_eq!(eff.max_rows, 10);
        assert_eq!(eff.title, "Engine Conformance");
        assert_eq!(eff.version_file, root.join("VERSION.properties"));
        assert_eq!(eff.version_key, "version");
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch_ledger(root, "testsrc/test262.properties");
        fs::write(
            root.join("conftrack.yaml"),
            "output: human\nreport:\n  markdown: docs/FEATURES.md\n",
        )
        .unwrap();

        let eff = resolve_effective(&at(root)).unwrap();
        assert_eq!(eff.ledger, root.join("testsrc/test262.properties"));
        assert_eq!(eff.out_dir, root);
        assert_eq!(eff.markdown_file, "docs/FEATURES.md");
        assert_eq!(eff.json_file, "features.json");
        assert_eq!(eff.html_file, "features.html");
        assert_eq!(eff.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(eff.title, DEFAULT_TITLE);
        assert!(!eff.write);
        assert!(eff.catalog.is_none());
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch_ledger(root, "a.properties");
        fs::write(
            root.join("conftrack.toml"),
            "output = \"json\"\n[report]\nwrite = true\nmax_rows = 5\n",
        )
        .unwrap();

        let cli = CliOverrides {
            repo_root: root.to_str(),
            ledger: Some("a.properties"),
            output: Some("human"),
            write: Some(false),
            max_rows: Some(0),
            catalog: Some("features.txt"),
            ..Default::default()
        };
        let eff = resolve_effective(&cli).unwrap();
        assert_eq!(eff.output, "human");
        assert!(!eff.write);
        assert_eq!(eff.max_rows, 0);
        assert_eq!(eff.ledger, root.join("a.properties"));
        assert_eq!(eff.catalog, Some(root.join("features.txt")));
    }

    #[test]
    fn test_default_ledger_prefers_tests_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        touch_ledger(root, "tests/testsrc/test262.properties");
        touch_ledger(root, "testsrc/test262.properties");
        let eff = resolve_effective(&at(root)).unwrap();
        assert_eq!(eff.ledger, root.join("tests/testsrc/test262.properties"));
    }

    #[test]
    fn test_missing_default_ledger_is_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let err = resolve_effective(&at(dir.path())).unwrap_err();
        assert!(matches!(err, Error::LedgerNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("testsrc/test262.properties"));
    }

    #[test]
    fn test_glob_ledger_picks_first_sorted_match() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch_ledger(root, "runs/b.properties");
        touch_ledger(root, "runs/a.properties");
        let path = resolve_ledger(root, &["runs/*.properties".to_string()]).unwrap();
        assert_eq!(path, root.join("runs/a.properties"));
        let err = resolve_ledger(root, &["none/*.properties".to_string()]).unwrap_err();
        assert!(matches!(err, Error::LedgerNotFound { .. }));
    }

    #[test]
    fn test_explicit_missing_ledger_is_deferred() {
        let dir = tempdir().unwrap();
        let path = resolve_ledger(dir.path(), &["gone.properties".to_string()]).unwrap();
        assert_eq!(path, dir.path().join("gone.properties"));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("conftrack.toml"), "ledger = [1, 2\n").unwrap();
        let err = resolve_effective(&at(root)).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        fs::write(root.join("conftrack.toml"), "unknown_key = 1\n").unwrap();
        assert!(load_config(root).is_err());
    }

    #[test]
    fn test_invalid_output_mode_rejected() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch_ledger(root, "testsrc/test262.properties");
        let cli = CliOverrides {
            output: Some("xml"),
            ..at(root)
        };
        assert!(matches!(
            resolve_effective(&cli),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_validate_output_modes() {
        let origin = Path::new(".");
        assert!(validate_output("human", origin).is_ok());
        assert!(validate_output("json", origin).is_ok());
        let err = validate_output("xml", origin).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("unsupported output `xml`"));
    }

    #[test]
    fn test_detect_repo_root_walks_up() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("conftrack.yml"), "output: json\n").unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root);
    }
}
