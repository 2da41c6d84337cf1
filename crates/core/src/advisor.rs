use crate::domain::{AssetClass, PrimaryInstrument, RecommendationResult};
use crate::error::{AdvisorError, Result};
use crate::ingest::provider::MetricsProvider;
use crate::questionnaire::{Answers, InvestorProfile, Questionnaire};
use crate::ranker::{RankOptions, Ranker};
use crate::risk::RiskLevel;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Overrides the asset class derived from the answers.
    pub asset_class: Option<AssetClass>,
    pub top_n: Option<usize>,
}

/// Answers in, ranked recommendation out.
#[derive(Clone)]
pub struct Advisor {
    questionnaire: Arc<Questionnaire>,
    ranker: Ranker,
}

impl Advisor {
    pub fn new(questionnaire: Arc<Questionnaire>, ranker: Ranker) -> Self {
        Self {
            questionnaire,
            ranker,
        }
    }

    pub fn with_builtin_tables(provider: Arc<dyn MetricsProvider>) -> Self {
        Self::new(
            Arc::new(Questionnaire::builtin().clone()),
            Ranker::with_builtin_tables(provider),
        )
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    pub fn interpret(&self, answers: &Answers) -> Result<InvestorProfile> {
        self.questionnaire.interpret_answers(answers)
    }

    /// Primary instrument for callers that cannot proceed without one.
    pub fn require_primary(&self, region: &str, level: RiskLevel) -> Result<PrimaryInstrument> {
        self.ranker
            .catalog()
            .primary_instrument(region, level)
            .ok_or_else(|| AdvisorError::MissingPrimaryInstrument {
                region: region.to_string(),
                level: level.value(),
            })
    }

    pub async fn recommend(
        &self,
        answers: &Answers,
        region: &str,
        opts: RecommendOptions,
    ) -> Result<RecommendationResult> {
        let profile = self.interpret(answers)?;
        let risk_level = profile.risk_level();
        let asset_class = opts.asset_class.unwrap_or_else(|| profile.asset_class());

        let recommendations = self
            .ranker
            .rank_with(
                region,
                asset_class,
                risk_level,
                RankOptions {
                    esg_only: profile.wants_esg_only(),
                    top_n: opts.top_n,
                },
            )
            .await?;

        let primary = self.ranker.catalog().primary_instrument(region, risk_level);
        if primary.is_none() {
            tracing::info!(region, %risk_level, "no primary instrument for region and risk level");
        }

        tracing::info!(
            region,
            %risk_level,
            %asset_class,
            esg_only = profile.wants_esg_only(),
            recommendations = recommendations.len(),
            "built recommendation"
        );

        Ok(RecommendationResult {
            risk_label: risk_level.label().to_string(),
            profile,
            risk_level,
            region: region.to_string(),
            asset_class,
            primary,
            recommendations,
            generated_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{UniverseCatalog, ANY_REGION};
    use crate::ingest::provider::StaticMetricsProvider;
    use crate::ingest::types::RawMetrics;
    use crate::questionnaire::{ESG_INTEREST, QUESTION_COUNT, RETURN_EXPECTATION, RISK_COMFORT};
    use crate::risk::RiskProfileTable;

    fn answers(comfort: usize, returns: usize, esg: usize) -> Answers {
        let mut a: Answers = (0..QUESTION_COUNT).map(|i| (i, 1)).collect();
        a.insert(RISK_COMFORT, comfort);
        a.insert(RETURN_EXPECTATION, returns);
        a.insert(ESG_INTEREST, esg);
        a
    }

    fn snapshot() -> StaticMetricsProvider {
        let mut spy = RawMetrics::missing("SPY");
        spy.trailing_pe = Some(24.0);
        spy.dividend_yield = Some(0.013);
        spy.beta = Some(1.0);
        let mut qqq = RawMetrics::missing("QQQ");
        qqq.trailing_pe = Some(33.0);
        qqq.beta = Some(1.15);
        qqq.revenue_growth = Some(0.14);
        StaticMetricsProvider::new([spy, qqq])
    }

    #[tokio::test]
    async fn balanced_profile_ranks_etfs_with_primary() {
        let advisor = Advisor::with_builtin_tables(Arc::new(snapshot()));
        let result = advisor
            .recommend(&answers(2, 2, 1), "North America", RecommendOptions::default())
            .await
            .unwrap();

        assert_eq!(result.risk_level, RiskLevel::BALANCED);
        assert_eq!(result.risk_label, "Balanced");
        assert_eq!(result.asset_class, AssetClass::Etf);
        assert_eq!(result.primary.as_ref().unwrap().ticker, "SPY");
        assert_eq!(result.recommendations.len(), 15);
        assert_eq!(result.recommendations[0].ticker(), "SPY");
    }

    #[tokio::test]
    async fn explicit_asset_class_and_top_n_are_honoured() {
        let advisor = Advisor::with_builtin_tables(Arc::new(snapshot()));
        let opts = RecommendOptions {
            asset_class: Some(AssetClass::Stocks),
            top_n: Some(4),
        };
        let result = advisor.recommend(&answers(0, 0, 1), ANY_REGION, opts).await.unwrap();

        assert_eq!(result.risk_level, RiskLevel::DEFENSIVE);
        assert_eq!(result.asset_class, AssetClass::Stocks);
        assert_eq!(result.recommendations.len(), 4);
        assert_eq!(result.primary.unwrap().ticker, "EUNL.DE");
    }

    #[tokio::test]
    async fn esg_interest_narrows_universe_to_sleeve() {
        let advisor = Advisor::with_builtin_tables(Arc::new(snapshot()));
        let result = advisor
            .recommend(&answers(4, 4, 0), "Europe", RecommendOptions::default())
            .await
            .unwrap();
        assert_eq!(result.asset_class, AssetClass::Stocks);
        assert_eq!(result.recommendations.len(), crate::catalog::ESG_SLEEVE_LEN);
    }

    #[tokio::test]
    async fn invalid_answers_fail_before_ranking() {
        let advisor = Advisor::with_builtin_tables(Arc::new(snapshot()));
        let mut a = answers(2, 2, 1);
        a.insert(RISK_COMFORT, 9);
        let err = advisor
            .recommend(&a, "Europe", RecommendOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_input());
    }

    #[tokio::test]
    async fn unknown_region_gives_empty_result_without_primary() {
        let advisor = Advisor::with_builtin_tables(Arc::new(snapshot()));
        let result = advisor
            .recommend(&answers(2, 2, 1), "Oceania", RecommendOptions::default())
            .await
            .unwrap();
        assert!(result.is_empty());
        assert!(result.primary.is_none());
        assert!(matches!(
            advisor.require_primary("Oceania", RiskLevel::BALANCED),
            Err(AdvisorError::MissingPrimaryInstrument { .. })
        ));
    }

    #[tokio::test]
    async fn risk_table_without_derived_level_is_a_configuration_error() {
        let only_defensive = RiskProfileTable::new(vec![RiskProfileTable::builtin()
            .config_for(RiskLevel::DEFENSIVE)
            .unwrap()
            .clone()])
        .unwrap();
        let ranker = Ranker::new(
            Arc::new(UniverseCatalog::builtin().clone()),
            Arc::new(only_defensive),
            Arc::new(snapshot()),
        );
        let advisor = Advisor::new(Arc::new(Questionnaire::builtin().clone()), ranker);

        let err = advisor
            .recommend(&answers(4, 3, 1), "Europe", RecommendOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::UnknownRiskLevel(5)));
        assert!(err.is_configuration());
    }
}
