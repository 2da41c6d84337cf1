//! Per-factor normalisation and the weighted composite score.
//!
//! Every factor is clamped to `[0, 1]` before weighting. Missing inputs never
//! drop a factor; they are replaced according to [`MissingPolicy`], which is
//! deliberately asymmetric:
//!
//! | factor | input            | transform                   | missing input |
//! |--------|------------------|-----------------------------|---------------|
//! | value  | trailing P/E     | `(30 - pe) / 30`            | factor = 0    |
//! | yield  | dividend yield   | `dy / 0.05`                 | dy = 0        |
//! | growth | revenue growth   | `g`                         | g = 0         |
//! | risk   | beta             | `(1.5 - beta) / 1.5`        | beta = 1.0    |
//! | esg    | ESG score (0..1) | `esg`                       | esg = 0.5     |

use crate::ingest::types::RawMetrics;
use serde::{Deserialize, Serialize};

/// P/E at or above which the value factor is zero.
pub const PE_CEILING: f64 = 30.0;
/// Dividend yield that saturates the yield factor.
pub const YIELD_SATURATION: f64 = 0.05;
/// Beta at or above which the risk factor is zero.
pub const BETA_CEILING: f64 = 1.5;

/// Substitutes for absent metrics. Input substitutes are applied before the
/// factor transform; `VALUE_FACTOR` replaces the value factor itself.
pub struct MissingPolicy;

impl MissingPolicy {
    pub const VALUE_FACTOR: f64 = 0.0;
    pub const DIVIDEND_YIELD: f64 = 0.0;
    pub const REVENUE_GROWTH: f64 = 0.0;
    pub const BETA: f64 = 1.0;
    pub const ESG_SCORE: f64 = 0.5;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub value: f64,
    pub dividend_yield: f64,
    pub growth: f64,
    pub risk: f64,
    pub esg: f64,
}

impl FactorWeights {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("value", self.value),
            ("dividend_yield", self.dividend_yield),
            ("growth", self.growth),
            ("risk", self.risk),
            ("esg", self.esg),
        ]
        .into_iter()
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, w)| w).sum()
    }
}

/// Normalised factor values for one instrument, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub value: f64,
    pub dividend_yield: f64,
    pub growth: f64,
    pub risk: f64,
    pub esg: f64,
}

impl FactorScores {
    pub fn weighted(&self, w: &FactorWeights) -> f64 {
        self.value * w.value
            + self.dividend_yield * w.dividend_yield
            + self.growth * w.growth
            + self.risk * w.risk
            + self.esg * w.esg
    }
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

pub fn value_factor(trailing_pe: Option<f64>) -> f64 {
    match trailing_pe {
        Some(pe) => clamp01((PE_CEILING - pe) / PE_CEILING),
        None => MissingPolicy::VALUE_FACTOR,
    }
}

pub fn yield_factor(dividend_yield: Option<f64>) -> f64 {
    clamp01(dividend_yield.unwrap_or(MissingPolicy::DIVIDEND_YIELD) / YIELD_SATURATION)
}

pub fn growth_factor(revenue_growth: Option<f64>) -> f64 {
    clamp01(revenue_growth.unwrap_or(MissingPolicy::REVENUE_GROWTH))
}

pub fn risk_factor(beta: Option<f64>) -> f64 {
    let beta = beta.unwrap_or(MissingPolicy::BETA);
    clamp01((BETA_CEILING - beta) / BETA_CEILING)
}

pub fn esg_factor(esg_score: Option<f64>) -> f64 {
    clamp01(esg_score.unwrap_or(MissingPolicy::ESG_SCORE))
}

pub fn factor_scores(record: &RawMetrics) -> FactorScores {
    FactorScores {
        value: value_factor(record.trailing_pe),
        dividend_yield: yield_factor(record.dividend_yield),
        growth: growth_factor(record.revenue_growth),
        risk: risk_factor(record.beta),
        esg: esg_factor(record.esg_score),
    }
}

/// Composite score on the scale implied by `weights` (0..=100 for the builtin tables).
pub fn score(record: &RawMetrics, weights: &FactorWeights) -> f64 {
    factor_scores(record).weighted(weights)
}
