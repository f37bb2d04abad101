//! Shared data models for ledger records, statuses, and aggregate stats.

pub mod catalog;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Result of one test-suite path as recorded in the ledger.
///
/// Records are only built through the constructors below, so `pass_rate`
/// always agrees with the line shape it came from.
pub struct ResultRecord {
    path: String,
    passed: u64,
    total: u64,
    pass_rate: f64,
    disabled: bool,
}

impl ResultRecord {
    /// Suite listed with `failed/total (failRate%)` counts.
    ///
    /// Returns `None` when the counts are inconsistent (`failed > total`) or
    /// the fail rate falls outside `[0, 100]`.
    pub fn from_counts(path: &str, failed: u64, total: u64, fail_rate: f64) -> Option<Self> {
        if failed > total || !(0.0..=100.0).contains(&fail_rate) {
            return None;
        }
        Some(Self {
            path: path.to_string(),
            passed: total - failed,
            total,
            pass_rate: 100.0 - fail_rate,
            disabled: false,
        })
    }

    /// Suite mentioned without counts; assumed fully passing.
    pub fn bare(path: &str) -> Self {
        Self {
            path: path.to_string(),
            passed: 0,
            total: 0,
            pass_rate: 100.0,
            disabled: false,
        }
    }

    /// Suite marked disabled with `~`.
    pub fn disabled(path: &str) -> Self {
        Self {
            path: path.to_string(),
            passed: 0,
            total: 0,
            pass_rate: 0.0,
            disabled: true,
        }
    }

    /// Mark a counted record as disabled. Historical counts are kept but the
    /// effective pass rate drops to zero.
    pub fn into_disabled(self) -> Self {
        Self {
            pass_rate: 0.0,
            disabled: true,
            ..self
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn passed(&self) -> u64 {
        self.passed
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn pass_rate(&self) -> f64 {
        self.pass_rate
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn status(&self) -> Status {
        Status::from_pass_rate(self.pass_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// Support level derived from a pass rate.
pub enum Status {
    Full,
    Mostly,
    Partial,
    Limited,
    None,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Full,
        Status::Mostly,
        Status::Partial,
        Status::Limited,
        Status::None,
    ];

    /// Bands are inclusive at their lower bound and checked from the top, so
    /// a boundary value lands in the higher band.
    pub fn from_pass_rate(rate: f64) -> Self {
        if rate >= 95.0 {
            Status::Full
        } else if rate >= 75.0 {
            Status::Mostly
        } else if rate >= 25.0 {
            Status::Partial
        } else if rate > 0.0 {
            Status::Limited
        } else {
            Status::None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Full => "Full",
            Status::Mostly => "Mostly",
            Status::Partial => "Partial",
            Status::Limited => "Limited",
            Status::None => "None",
        }
    }

    /// Legend wording used by the Markdown and HTML renderers.
    pub fn legend(self) -> &'static str {
        match self {
            Status::Full => "Full Support (95-100% tests passing)",
            Status::Mostly => "Mostly Supported (75-94% tests passing)",
            Status::Partial => "Partial Support (25-74% tests passing)",
            Status::Limited => "Limited Support (1-24% tests passing)",
            Status::None => "Not Supported (0% tests passing)",
        }
    }

    /// Lowercase token for CSS classes.
    pub fn css_class(self) -> &'static str {
        match self {
            Status::Full => "full",
            Status::Mostly => "mostly",
            Status::Partial => "partial",
            Status::Limited => "limited",
            Status::None => "none",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Per-status tallies.
pub struct StatusCounts {
    pub full: usize,
    pub mostly: usize,
    pub partial: usize,
    pub limited: usize,
    pub none: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: Status) {
        match status {
            Status::Full => self.full += 1,
            Status::Mostly => self.mostly += 1,
            Status::Partial => self.partial += 1,
            Status::Limited => self.limited += 1,
            Status::None => self.none += 1,
        }
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Full => self.full,
            Status::Mostly => self.mostly,
            Status::Partial => self.partial,
            Status::Limited => self.limited,
            Status::None => self.none,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Aggregate counters over a set of records (one category or the whole ledger).
pub struct Stats {
    pub suites: usize,
    pub disabled: usize,
    pub total_tests: u64,
    pub passed_tests: u64,
    pub pass_rate: f64,
    pub statuses: StatusCounts,
}

impl Stats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ResultRecord>) -> Self {
        let mut stats = Stats::default();
        for r in records {
            stats.suites += 1;
            if r.is_disabled() {
                stats.disabled += 1;
            }
            stats.total_tests = stats.total_tests.saturating_add(r.total());
            stats.passed_tests = stats.passed_tests.saturating_add(r.passed());
            stats.statuses.add(r.status());
        }
        stats.pass_rate = ratio_percent(stats.passed_tests, stats.total_tests);
        stats
    }
}

/// `100 × passed / total`, or `0` for an empty total.
pub fn ratio_percent(passed: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * passed as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds_resolve_boundaries_upward() {
        assert_eq!(Status::from_pass_rate(100.0), Status::Full);
        assert_eq!(Status::from_pass_rate(95.0), Status::Full);
        assert_eq!(Status::from_pass_rate(94.9), Status::Mostly);
        assert_eq!(Status::from_pass_rate(75.0), Status::Mostly);
        assert_eq!(Status::from_pass_rate(74.99), Status::Partial);
        assert_eq!(Status::from_pass_rate(25.0), Status::Partial);
        assert_eq!(Status::from_pass_rate(24.9), Status::Limited);
        assert_eq!(Status::from_pass_rate(0.01), Status::Limited);
        assert_eq!(Status::from_pass_rate(0.0), Status::None);
    }

    #[test]
    fn test_counted_record_derives_passed_and_rate() {
        let r = ResultRecord::from_counts("built-ins/Array/prototype/includes", 10, 200, 5.0)
            .unwrap();
        assert_eq!(r.passed(), 190);
        assert_eq!(r.total(), 200);
        assert_eq!(r.pass_rate(), 95.0);
        assert!(!r.is_disabled());
        assert_eq!(r.status(), Status::Full);
    }

    #[test]
    fn test_counted_record_rejects_failed_above_total() {
        assert!(ResultRecord::from_counts("x", 11, 10, 110.0).is_none());
        assert!(ResultRecord::from_counts("x", 1, 10, 100.5).is_none());
    }

    #[test]
    fn test_bare_and_disabled_records() {
        let bare = ResultRecord::bare("language/statements/class");
        assert_eq!(bare.pass_rate(), 100.0);
        assert_eq!(bare.total(), 0);
        let off = ResultRecord::disabled("annexB/RegExp/legacy");
        assert_eq!(off.pass_rate(), 0.0);
        assert!(off.is_disabled());
        assert_eq!(off.status(), Status::None);
    }

    #[test]
    fn test_disabling_keeps_counts_but_zeroes_rate() {
        let r = ResultRecord::from_counts("built-ins/Atomics", 3, 10, 30.0)
            .unwrap()
            .into_disabled();
        assert_eq!(r.passed(), 7);
        assert_eq!(r.total(), 10);
        assert_eq!(r.pass_rate(), 0.0);
        assert!(r.is_disabled());
    }

    #[test]
    fn test_stats_zero_total_has_zero_rate() {
        let records = vec![ResultRecord::bare("a"), ResultRecord::disabled("b")];
        let stats = Stats::from_records(&records);
        assert_eq!(stats.suites, 2);
        assert_eq!(stats.disabled, 1);
        assert_eq!(stats.total_tests, 0);
        assert_eq!(stats.pass_rate, 0.0);
        assert_eq!(stats.statuses.full, 1);
        assert_eq!(stats.statuses.none, 1);
    }

    #[test]
    fn test_stats_saturate_on_huge_counts() {
        let records = vec![
            ResultRecord::from_counts("built-ins/Array/a", 0, u64::MAX, 0.0).unwrap(),
            ResultRecord::from_counts("built-ins/Array/b", 0, u64::MAX, 0.0).unwrap(),
        ];
        let stats = Stats::from_records(&records);
        assert_eq!(stats.total_tests, u64::MAX);
        assert_eq!(stats.passed_tests, u64::MAX);
        assert_eq!(stats.pass_rate, 100.0);
    }

    #[test]
    fn test_stats_sum_counts() {
        let records = vec![
            ResultRecord::from_counts("a", 10, 100, 10.0).unwrap(),
            ResultRecord::from_counts("b", 0, 100, 0.0).unwrap(),
        ];
        let stats = Stats::from_records(&records);
        assert_eq!(stats.total_tests, 200);
        assert_eq!(stats.passed_tests, 190);
        assert_eq!(stats.pass_rate, 95.0);
    }
}
