use crate::domain::asset::AssetClass;
use crate::ingest::types::{InstrumentId, RawMetrics};
use crate::questionnaire::InvestorProfile;
use crate::risk::RiskLevel;
use crate::scoring::FactorScores;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub name: String,
    pub category: String,
}

/// Single representative pick for a region and risk level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryInstrument {
    pub profile_name: String,
    pub ticker: InstrumentId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredInstrument {
    #[serde(flatten)]
    pub metrics: RawMetrics,
    pub factors: FactorScores,
    pub score: f64,
    pub display: DisplayInfo,
}

impl ScoredInstrument {
    pub fn ticker(&self) -> &str {
        &self.metrics.ticker
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub profile: InvestorProfile,
    pub risk_level: RiskLevel,
    pub risk_label: String,
    pub region: String,
    pub asset_class: AssetClass,
    pub primary: Option<PrimaryInstrument>,
    pub recommendations: Vec<ScoredInstrument>,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationResult {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}
