//! Feature catalog schema and resolved support entries.

use super::{ResultRecord, Status, StatusCounts};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One named language feature and the suite path that exercises it.
pub struct Feature {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Features introduced by one ECMAScript edition, in declaration order.
pub struct EditionFeatures {
    pub edition: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Support level of a catalog feature as resolved against the ledger.
pub struct FeatureSupport {
    pub name: String,
    pub path: String,
    pub passed: u64,
    pub total: u64,
    pub pass_rate: f64,
    pub disabled: bool,
    pub not_found: bool,
    pub status: Status,
}

impl FeatureSupport {
    pub fn from_record(feature: &Feature, record: &ResultRecord) -> Self {
        Self {
            name: feature.name.clone(),
            path: feature.path.clone(),
            passed: record.passed(),
            total: record.total(),
            pass_rate: record.pass_rate(),
            disabled: record.is_disabled(),
            not_found: false,
            status: record.status(),
        }
    }

    pub fn not_found(feature: &Feature) -> Self {
        Self {
            name: feature.name.clone(),
            path: feature.path.clone(),
            passed: 0,
            total: 0,
            pass_rate: 0.0,
            disabled: false,
            not_found: true,
            status: Status::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Resolved features for one edition plus their tallies.
pub struct EditionSupport {
    pub edition: String,
    pub features: Vec<FeatureSupport>,
    pub statuses: StatusCounts,
    pub avg_pass_rate: f64,
}

impl EditionSupport {
    pub fn new(edition: String, features: Vec<FeatureSupport>) -> Self {
        let mut statuses = StatusCounts::default();
        for f in &features {
            statuses.add(f.status);
        }
        let avg_pass_rate = if features.is_empty() {
            0.0
        } else {
            features.iter().map(|f| f.pass_rate).sum::<f64>() / features.len() as f64
        };
        Self {
            edition,
            features,
            statuses,
            avg_pass_rate,
        }
    }
}
