use super::RiskLevel;
use crate::error::{AdvisorError, Result};
use crate::ingest::types::MetricField;
use crate::scoring::{Bounds, FactorWeights, FilterSet};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfiguration {
    pub level: RiskLevel,
    pub weights: FactorWeights,
    #[serde(default)]
    pub filters: FilterSet,
}

impl RiskConfiguration {
    fn validate(&self) -> Result<()> {
        let level = self.level.value();
        let invalid = |detail: String| AdvisorError::InvalidRiskProfile { level, detail };

        for (factor, w) in self.weights.iter() {
            if !w.is_finite() || w < 0.0 {
                return Err(invalid(format!("weight {factor} must be finite and >= 0 (got {w})")));
            }
        }

        for (field, bounds) in &self.filters {
            for b in [bounds.min, bounds.max].into_iter().flatten() {
                if !b.is_finite() {
                    return Err(invalid(format!("filter {field} has a non-finite bound")));
                }
            }
            if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
                if min > max {
                    return Err(invalid(format!("filter {field} has min {min} > max {max}")));
                }
            }
        }

        Ok(())
    }
}

/// Immutable risk level → configuration registry.
#[derive(Debug, Clone)]
pub struct RiskProfileTable {
    configs: Vec<RiskConfiguration>,
}

static BUILTIN: OnceLock<RiskProfileTable> = OnceLock::new();

impl RiskProfileTable {
    /// Validates every entry; a table that fails here is never constructed.
    pub fn new(configs: Vec<RiskConfiguration>) -> Result<Self> {
        let mut configs = configs;
        configs.sort_by_key(|c| c.level);

        for pair in configs.windows(2) {
            if pair[0].level == pair[1].level {
                return Err(AdvisorError::InvalidRiskProfile {
                    level: pair[0].level.value(),
                    detail: "duplicate risk level".to_string(),
                });
            }
        }
        for c in &configs {
            c.validate()?;
        }

        Ok(Self { configs })
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let configs: Vec<RiskConfiguration> = serde_json::from_str(text)?;
        anyhow::ensure!(!configs.is_empty(), "risk profile table must not be empty");
        Ok(Self::new(configs)?)
    }

    pub fn builtin() -> &'static RiskProfileTable {
        BUILTIN.get_or_init(|| {
            // The literal table below is covered by `builtin_table_is_valid`.
            Self {
                configs: builtin_configs(),
            }
        })
    }

    pub fn config_for(&self, level: RiskLevel) -> Result<&RiskConfiguration> {
        self.configs
            .iter()
            .find(|c| c.level == level)
            .ok_or(AdvisorError::UnknownRiskLevel(level.value()))
    }

    pub fn levels(&self) -> Vec<RiskLevel> {
        self.configs.iter().map(|c| c.level).collect()
    }

    pub fn configs(&self) -> &[RiskConfiguration] {
        &self.configs
    }
}

fn builtin_configs() -> Vec<RiskConfiguration> {
    vec![
        RiskConfiguration {
            level: RiskLevel::DEFENSIVE,
            weights: FactorWeights {
                value: 30.0,
                dividend_yield: 30.0,
                growth: 5.0,
                risk: 25.0,
                esg: 10.0,
            },
            filters: FilterSet::from([
                (MetricField::TrailingPe, Bounds::at_most(25.0)),
                (MetricField::Beta, Bounds::at_most(1.0)),
            ]),
        },
        RiskConfiguration {
            level: RiskLevel::BALANCED,
            weights: FactorWeights {
                value: 25.0,
                dividend_yield: 20.0,
                growth: 20.0,
                risk: 20.0,
                esg: 15.0,
            },
            filters: FilterSet::from([
                (MetricField::TrailingPe, Bounds::at_most(35.0)),
                (MetricField::Beta, Bounds::at_most(1.3)),
            ]),
        },
        RiskConfiguration {
            level: RiskLevel::GROWTH,
            weights: FactorWeights {
                value: 15.0,
                dividend_yield: 5.0,
                growth: 45.0,
                risk: 10.0,
                esg: 25.0,
            },
            filters: FilterSet::from([(MetricField::Beta, Bounds::at_most(2.0))]),
        },
    ]
}
