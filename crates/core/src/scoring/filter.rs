use crate::ingest::types::{MetricField, RawMetrics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive range; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        if let Some(min) = self.min {
            if v < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if v > max {
                return false;
            }
        }
        true
    }
}

pub type FilterSet = BTreeMap<MetricField, Bounds>;

/// A missing field satisfies its filter; only a present, out-of-range value fails.
pub fn passes(record: &RawMetrics, filters: &FilterSet) -> bool {
    filters.iter().all(|(field, bounds)| match record.get(*field) {
        Some(v) => bounds.contains(v),
        None => true,
    })
}

/// Keeps records that pass every filter, preserving input order.
pub fn apply_filters(records: Vec<RawMetrics>, filters: &FilterSet) -> Vec<RawMetrics> {
    records.into_iter().filter(|r| passes(r, filters)).collect()
}
