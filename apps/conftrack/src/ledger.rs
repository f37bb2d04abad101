//! Ledger parsing: turns `test262.properties`-style text into result records.
//!
//! Recognized line shapes (after trimming):
//! - `# comment` and blank lines: skipped.
//! - `~<path>` or `~<path> F/T (R%)`: disabled suite.
//! - `<path> F/T (R%)`: suite with `F` failing out of `T` tests.
//! - `<path>`: suite mentioned without counts, assumed fully passing.
//!
//! Anything else is skipped. The first line that creates a record for a path
//! wins; later mentions of the same path never overwrite it.

use crate::error::{Error, Result};
use crate::models::ResultRecord;
use regex::Regex;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Characters allowed in a suite path.
const PATH_PATTERN: &str = r"[\w\-/.]+";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Line accounting for one parse pass.
pub struct ParseStats {
    pub lines: usize,
    pub records: usize,
    pub ignored: usize,
    pub skipped: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Parsed ledger: one record per distinct path, keyed and ordered by path.
pub struct Ledger {
    records: BTreeMap<String, ResultRecord>,
    stats: ParseStats,
}

impl Ledger {
    pub fn records(&self) -> &BTreeMap<String, ResultRecord> {
        &self.records
    }

    pub fn get(&self, path: &str) -> Option<&ResultRecord> {
        self.records.get(path)
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of classifying a single line.
#[derive(Debug, PartialEq)]
enum LineKind {
    Ignored,
    Record(ResultRecord),
    Malformed,
}

/// Compiled line grammar.
pub struct LedgerParser {
    result_line: Regex,
    bare_path: Regex,
}

impl Default for LedgerParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerParser {
    pub fn new() -> Self {
        // Both patterns are constants; compilation cannot fail at runtime.
        let result_line = Regex::new(&format!(
            r"^({PATH_PATTERN})\s+(\d+)/(\d+)\s+\(([0-9]+(?:\.[0-9]+)?)%\)$"
        ))
        .expect("valid result-line pattern");
        let bare_path = Regex::new(&format!(r"^{PATH_PATTERN}$"))
            .expect("valid path pattern");
        Self {
            result_line,
            bare_path,
        }
    }

    /// Parse the full ledger text. Never fails: unrecognized lines are counted
    /// as skipped and otherwise ignored.
    pub fn parse(&self, text: &str) -> Ledger {
        let mut records: BTreeMap<String, ResultRecord> = BTreeMap::new();
        let mut stats = ParseStats::default();
        for (lineno, line) in text.lines().enumerate() {
            stats.lines += 1;
            match self.classify(line) {
                LineKind::Ignored => stats.ignored += 1,
                LineKind::Malformed => {
                    stats.skipped += 1;
                    log::debug!("ledger line {} skipped: {:?}", lineno + 1, line.trim());
                }
                LineKind::Record(rec) => match records.entry(rec.path().to_string()) {
                    Entry::Vacant(slot) => {
                        slot.insert(rec);
                        stats.records += 1;
                    }
                    Entry::Occupied(_) => {
                        stats.duplicates += 1;
                        log::debug!(
                            "ledger line {}: {} already recorded; keeping first entry",
                            lineno + 1,
                            rec.path()
                        );
                    }
                },
            }
        }
        Ledger { records, stats }
    }

    fn classify(&self, line: &str) -> LineKind {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return LineKind::Ignored;
        }
        if let Some(rest) = trimmed.strip_prefix('~') {
            let rest = rest.trim();
            if let Some(parsed) = self.parse_result_line(rest) {
                return match parsed {
                    Some(rec) => LineKind::Record(rec.into_disabled()),
                    None => LineKind::Malformed,
                };
            }
            if self.bare_path.is_match(rest) {
                return LineKind::Record(ResultRecord::disabled(rest));
            }
            return LineKind::Malformed;
        }
        if let Some(parsed) = self.parse_result_line(trimmed) {
            return match parsed {
                Some(rec) => LineKind::Record(rec),
                None => LineKind::Malformed,
            };
        }
        if self.bare_path.is_match(trimmed) {
            return LineKind::Record(ResultRecord::bare(trimmed));
        }
        LineKind::Malformed
    }

    /// `None` when the line is not a result line at all; `Some(None)` when it
    /// has the result shape but inconsistent numbers.
    fn parse_result_line(&self, line: &str) -> Option<Option<ResultRecord>> {
        let caps = self.result_line.captures(line)?;
        let path = caps.get(1)?.as_str();
        let numbers = (
            caps[2].parse::<u64>(),
            caps[3].parse::<u64>(),
            caps[4].parse::<f64>(),
        );
        let (Ok(failed), Ok(total), Ok(fail_rate)) = numbers else {
            return Some(None);
        };
        Some(ResultRecord::from_counts(path, failed, total, fail_rate))
    }
}

/// Read and parse the ledger file. A missing or unreadable file is the one
/// fatal condition of a run.
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    let text = fs::read_to_string(path).map_err(|source| Error::LedgerUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let ledger = LedgerParser::new().parse(&text);
    log::info!(
        "parsed {}: {} records, {} skipped lines",
        path.display(),
        ledger.stats().records,
        ledger.stats().skipped
    );
    Ok(ledger)
}
