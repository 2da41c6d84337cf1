use crate::advisor::RecommendOptions;
use crate::catalog::ANY_REGION;
use crate::domain::asset::AssetClass;
use crate::error::{AdvisorError, Result};
use crate::questionnaire::Answers;
use serde::{Deserialize, Serialize};

pub const MAX_TOP_N: usize = 50;

/// Wire shape of a recommendation request, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub answers: Answers,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub asset_class: Option<String>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub answers: Answers,
    pub region: String,
    pub options: RecommendOptions,
}

impl RecommendationRequest {
    pub fn validate(self) -> Result<ValidatedRequest> {
        let region = self
            .region
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ANY_REGION.to_string());

        let asset_class = self
            .asset_class
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<AssetClass>)
            .transpose()?;

        if let Some(n) = self.top_n {
            if !(1..=MAX_TOP_N).contains(&n) {
                return Err(AdvisorError::InvalidRequest(format!(
                    "top_n must be 1..={MAX_TOP_N} (got {n})"
                )));
            }
        }

        Ok(ValidatedRequest {
            answers: self.answers,
            region,
            options: RecommendOptions {
                asset_class,
                top_n: self.top_n,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_string_keyed_answers() {
        let req: RecommendationRequest = serde_json::from_value(json!({
            "answers": {"0": 1, "2": 4},
            "region": "Europe",
        }))
        .unwrap();
        assert_eq!(req.answers.get(&2).copied(), Some(4));

        let v = req.validate().unwrap();
        assert_eq!(v.region, "Europe");
        assert_eq!(v.options.asset_class, None);
        assert_eq!(v.options.top_n, None);
    }

    #[test]
    fn blank_region_means_any() {
        let req: RecommendationRequest =
            serde_json::from_value(json!({"answers": {}, "region": "  "})).unwrap();
        assert_eq!(req.validate().unwrap().region, ANY_REGION);
    }

    #[test]
    fn rejects_unknown_asset_class_and_bad_top_n() {
        let req: RecommendationRequest =
            serde_json::from_value(json!({"answers": {}, "asset_class": "gold"})).unwrap();
        assert!(matches!(
            req.validate(),
            Err(AdvisorError::InvalidAssetClass(_))
        ));

        let req: RecommendationRequest =
            serde_json::from_value(json!({"answers": {}, "top_n": 0})).unwrap();
        assert!(req.validate().unwrap_err().is_input());
    }

    #[test]
    fn accepts_explicit_asset_class() {
        let req: RecommendationRequest = serde_json::from_value(json!({
            "answers": {},
            "asset_class": "Stocks",
            "top_n": 3,
        }))
        .unwrap();
        let v = req.validate().unwrap();
        assert_eq!(v.options.asset_class, Some(AssetClass::Stocks));
        assert_eq!(v.options.top_n, Some(3));
    }
}
