//! Categorized report model.
//!
//! Groups ledger records by category, computes per-category and global
//! statistics, and resolves the feature catalog. Renderers only read from
//! the finished `CategorizedReport`.

use crate::catalog::FeatureCatalog;
use crate::categorize::categorize;
use crate::ledger::{Ledger, ParseStats};
use crate::models::catalog::EditionSupport;
use crate::models::{ResultRecord, Stats, Status};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Records of one category and their aggregate.
pub struct CategoryGroup {
    pub stats: Stats,
    pub tests: BTreeMap<String, ResultRecord>,
}

impl CategoryGroup {
    fn new(tests: BTreeMap<String, ResultRecord>) -> Self {
        let stats = Stats::from_records(tests.values());
        Self { stats, tests }
    }

    /// Records ordered for display: highest pass rate first, then by path.
    pub fn ranked(&self) -> Vec<&ResultRecord> {
        let mut items: Vec<&ResultRecord> = self.tests.values().collect();
        items.sort_by(|a, b| {
            b.pass_rate()
                .partial_cmp(&a.pass_rate())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.path().cmp(b.path()))
        });
        items
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Catalog-level tallies across all editions.
pub struct FeatureSummary {
    pub total_features: usize,
    pub fully_supported: usize,
    pub partially_supported: usize,
    pub not_supported: usize,
}

impl FeatureSummary {
    fn from_editions(editions: &[EditionSupport]) -> Self {
        let mut out = FeatureSummary::default();
        for f in editions.iter().flat_map(|e| e.features.iter()) {
            out.total_features += 1;
            if f.pass_rate >= 95.0 {
                out.fully_supported += 1;
            } else if f.pass_rate > 0.0 {
                out.partially_supported += 1;
            } else {
                out.not_supported += 1;
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
/// The complete model handed to renderers.
pub struct CategorizedReport {
    categories: BTreeMap<String, CategoryGroup>,
    totals: Stats,
    editions: Vec<EditionSupport>,
    features: FeatureSummary,
    parse: ParseStats,
}

impl CategorizedReport {
    /// Categorize every ledger record and resolve the catalog against it.
    pub fn build(ledger: &Ledger, catalog: &FeatureCatalog) -> Self {
        let mut buckets: BTreeMap<String, BTreeMap<String, ResultRecord>> = BTreeMap::new();
        for (path, rec) in ledger.records() {
            buckets
                .entry(categorize(path))
                .or_default()
                .insert(path.clone(), rec.clone());
        }
        let categories: BTreeMap<String, CategoryGroup> = buckets
            .into_iter()
            .map(|(name, tests)| (name, CategoryGroup::new(tests)))
            .collect();
        let totals = Stats::from_records(categories.values().flat_map(|g| g.tests.values()));
        let editions = catalog.resolve(ledger);
        let features = FeatureSummary::from_editions(&editions);
        Self {
            categories,
            totals,
            editions,
            features,
            parse: ledger.stats().clone(),
        }
    }

    pub fn categories(&self) -> &BTreeMap<String, CategoryGroup> {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&CategoryGroup> {
        self.categories.get(name)
    }

    pub fn totals(&self) -> &Stats {
        &self.totals
    }

    pub fn editions(&self) -> &[EditionSupport] {
        &self.editions
    }

    pub fn features(&self) -> &FeatureSummary {
        &self.features
    }

    pub fn parse_stats(&self) -> &ParseStats {
        &self.parse
    }

    /// Categories ordered by descending pass rate, then name.
    pub fn ranked_categories(&self) -> Vec<(&str, &CategoryGroup)> {
        let mut items: Vec<(&str, &CategoryGroup)> = self
            .categories
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        items.sort_by(|a, b| {
            b.1.stats
                .pass_rate
                .partial_cmp(&a.1.stats.pass_rate)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        items
    }

    /// Catalog features at status `Full` within the given editions.
    pub fn working_features<'a>(&'a self, editions: &[&str]) -> Vec<(&'a str, Vec<&'a str>)> {
        self.editions
            .iter()
            .filter(|e| editions.contains(&e.edition.as_str()))
            .map(|e| {
                let names = e
                    .features
                    .iter()
                    .filter(|f| f.status == Status::Full)
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>();
                (e.edition.as_str(), names)
            })
            .filter(|(_, names)| !names.is_empty())
            .collect()
    }

    /// Catalog features at 0% or disabled, per edition.
    pub fn unsupported_features(&self) -> Vec<(&str, Vec<&str>)> {
        self.editions
            .iter()
            .map(|e| {
                let names = e
                    .features
                    .iter()
                    .filter(|f| f.pass_rate == 0.0 || f.disabled)
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>();
                (e.edition.as_str(), names)
            })
            .filter(|(_, names)| !names.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerParser;

    fn sample() -> CategorizedReport {
        let ledger = LedgerParser::new().parse(
            "built-ins/Array/prototype/includes 10/200 (5.00%)\n\
             built-ins/Array/from 50/100 (50.00%)\n\
             ~annexB/RegExp/legacy\n\
             language/statements/class\n\
             language/statements/class 50/1000 (5.00%)\n\
             built-ins/Map 0/40 (0.00%)\n",
        );
        let catalog = FeatureCatalog::parse(
            "ES2016|Array.includes|built-ins/Array/prototype/includes\n\
             ES2017|Map|built-ins/Map\n\
             ES2017|Legacy RegExp|annexB/RegExp/legacy\n",
        );
        CategorizedReport::build(&ledger, &catalog)
    }

    #[test]
    fn test_records_grouped_by_category() {
        let report = sample();
        let arrays = report.category("Core Objects - Array").unwrap();
        assert_eq!(arrays.tests.len(), 2);
        assert_eq!(arrays.stats.total_tests, 300);
        assert_eq!(arrays.stats.passed_tests, 240);
        assert_eq!(arrays.stats.pass_rate, 80.0);
        assert!(report.category("Annex B (Legacy)").is_some());
        assert!(report.category("Collections").is_some());
    }

    #[test]
    fn test_zero_total_category_rate_is_zero() {
        let report = sample();
        let annex = report.category("Annex B (Legacy)").unwrap();
        assert_eq!(annex.stats.total_tests, 0);
        assert_eq!(annex.stats.pass_rate, 0.0);
        // Bare-only category: all suites "Full", yet no tests to divide by.
        let stmts = report.category("Language - Statements").unwrap();
        assert_eq!(stmts.stats.pass_rate, 0.0);
        assert_eq!(stmts.stats.statuses.full, 1);
    }

    #[test]
    fn test_totals_sum_all_categories() {
        let report = sample();
        let t = report.totals();
        assert_eq!(t.suites, 5);
        assert_eq!(t.total_tests, 340);
        assert_eq!(t.passed_tests, 280);
        assert_eq!(t.disabled, 1);
    }

    #[test]
    fn test_ranked_descending_with_path_tiebreak() {
        let ledger = LedgerParser::new().parse(
            "built-ins/Array/b 5/10 (50.00%)\n\
             built-ins/Array/a 5/10 (50.00%)\n\
             built-ins/Array/c 0/10 (0.00%)\n",
        );
        let report = CategorizedReport::build(&ledger, &FeatureCatalog::parse(""));
        let ranked: Vec<&str> = report
            .category("Core Objects - Array")
            .unwrap()
            .ranked()
            .iter()
            .map(|r| r.path())
            .collect();
        assert_eq!(
            ranked,
            vec!["built-ins/Array/c", "built-ins/Array/a", "built-ins/Array/b"]
        );
    }

    #[test]
    fn test_feature_sections() {
        let report = sample();
        let f = report.features();
        assert_eq!(f.total_features, 3);
        assert_eq!(f.fully_supported, 2);
        assert_eq!(f.not_supported, 1);
        let working = report.working_features(&["ES2017"]);
        assert_eq!(working, vec![("ES2017", vec!["Map"])]);
        let missing = report.unsupported_features();
        assert_eq!(missing, vec![("ES2017", vec!["Legacy RegExp"])]);
    }

    #[test]
    fn test_build_survives_counts_near_u64_max() {
        let ledger = LedgerParser::new().parse(
            "built-ins/Array/a 0/18446744073709551615 (0.00%)\n\
             built-ins/Array/b 0/18446744073709551615 (0.00%)\n",
        );
        assert_eq!(ledger.len(), 2);
        let report = CategorizedReport::build(&ledger, &FeatureCatalog::parse(""));
        let arrays = report.category("Core Objects - Array").unwrap();
        assert_eq!(arrays.stats.total_tests, u64::MAX);
        assert_eq!(report.totals().passed_tests, u64::MAX);
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(sample(), sample());
    }
}
