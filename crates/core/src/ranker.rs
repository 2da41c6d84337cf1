use crate::catalog::UniverseCatalog;
use crate::domain::{AssetClass, ScoredInstrument};
use crate::error::{AdvisorError, Result};
use crate::ingest::provider::{align_to_request, MetricsProvider};
use crate::ingest::types::RawMetrics;
use crate::risk::{RiskConfiguration, RiskLevel, RiskProfileTable};
use crate::scoring::{apply_filters, factor_scores};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankOptions {
    /// Restrict the universe to its leading ESG sleeve.
    pub esg_only: bool,
    /// Keep only the best `n` after sorting.
    pub top_n: Option<usize>,
}

/// Filter → score → sort over one (region, asset class, risk level) universe.
#[derive(Clone)]
pub struct Ranker {
    catalog: Arc<UniverseCatalog>,
    risk_table: Arc<RiskProfileTable>,
    provider: Arc<dyn MetricsProvider>,
}

impl Ranker {
    pub fn new(
        catalog: Arc<UniverseCatalog>,
        risk_table: Arc<RiskProfileTable>,
        provider: Arc<dyn MetricsProvider>,
    ) -> Self {
        Self {
            catalog,
            risk_table,
            provider,
        }
    }

    /// Ranker over the builtin catalog and risk table.
    pub fn with_builtin_tables(provider: Arc<dyn MetricsProvider>) -> Self {
        Self::new(
            Arc::new(UniverseCatalog::builtin().clone()),
            Arc::new(RiskProfileTable::builtin().clone()),
            provider,
        )
    }

    pub fn catalog(&self) -> &UniverseCatalog {
        &self.catalog
    }

    pub fn risk_table(&self) -> &RiskProfileTable {
        &self.risk_table
    }

    pub async fn rank(
        &self,
        region: &str,
        asset_class: AssetClass,
        level: RiskLevel,
    ) -> Result<Vec<ScoredInstrument>> {
        self.rank_with(region, asset_class, level, RankOptions::default())
            .await
    }

    /// An empty universe or a fully filtered one is `Ok(vec![])`, not an error.
    pub async fn rank_with(
        &self,
        region: &str,
        asset_class: AssetClass,
        level: RiskLevel,
        opts: RankOptions,
    ) -> Result<Vec<ScoredInstrument>> {
        let config = self.risk_table.config_for(level)?;

        let tickers = self
            .catalog
            .lookup_filtered(region, asset_class, opts.esg_only);
        if tickers.is_empty() {
            tracing::debug!(region, %asset_class, %level, "empty universe; nothing to rank");
            return Ok(Vec::new());
        }

        let fetched = self
            .provider
            .fetch_metrics(&tickers)
            .await
            .map_err(AdvisorError::MetricsProvider)?;
        if fetched.len() != tickers.len() {
            tracing::warn!(
                provider = self.provider.provider_name(),
                requested = tickers.len(),
                returned = fetched.len(),
                "metrics provider returned a different number of records; realigning"
            );
        }
        let records = align_to_request(&tickers, fetched);

        let mut ranked = rank_records(&self.catalog, asset_class, config, records);
        if let Some(n) = opts.top_n {
            ranked.truncate(n);
        }

        tracing::debug!(
            region,
            %asset_class,
            %level,
            universe = tickers.len(),
            ranked = ranked.len(),
            "ranked universe"
        );
        Ok(ranked)
    }
}

/// Pure part of the pipeline: filter, score and stably sort by descending score.
/// Ties keep their input (catalog) order.
pub fn rank_records(
    catalog: &UniverseCatalog,
    asset_class: AssetClass,
    config: &RiskConfiguration,
    records: Vec<RawMetrics>,
) -> Vec<ScoredInstrument> {
    let mut scored: Vec<ScoredInstrument> = apply_filters(records, &config.filters)
        .into_iter()
        .map(|metrics| {
            let factors = factor_scores(&metrics);
            let display = catalog.display_info(&metrics.ticker, asset_class);
            ScoredInstrument {
                score: factors.weighted(&config.weights),
                factors,
                display,
                metrics,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ANY_REGION;
    use crate::ingest::provider::{HttpJsonMetricsProvider, StaticMetricsProvider};
    use crate::ingest::types::{InstrumentId, MetricField};
    use crate::scoring::{passes, Bounds, FactorWeights, FilterSet};
    use std::time::Duration;

    fn metrics(
        ticker: &str,
        pe: Option<f64>,
        dy: Option<f64>,
        growth: Option<f64>,
        beta: Option<f64>,
        esg: Option<f64>,
    ) -> RawMetrics {
        RawMetrics {
            trailing_pe: pe,
            dividend_yield: dy,
            revenue_growth: growth,
            beta,
            esg_score: esg,
            ..RawMetrics::missing(ticker)
        }
    }

    /// Deterministic synthetic metrics for every builtin ticker.
    fn synthetic_snapshot() -> StaticMetricsProvider {
        let catalog = UniverseCatalog::builtin();
        let mut seen = std::collections::BTreeSet::new();
        let mut records = Vec::new();
        for (i, t) in catalog
            .regions()
            .into_iter()
            .flat_map(|r| AssetClass::ALL.into_iter().flat_map(move |c| catalog.lookup(r, c)))
            .enumerate()
        {
            if !seen.insert(t.clone()) {
                continue;
            }
            let k = i as f64;
            records.push(metrics(
                &t,
                if i % 7 == 0 { None } else { Some(8.0 + (k * 3.7) % 30.0) },
                if i % 5 == 0 { None } else { Some((k * 0.0031) % 0.06) },
                Some(((k * 0.043) % 0.5) - 0.1),
                if i % 4 == 0 { None } else { Some(0.4 + (k * 0.13) % 1.4) },
                if i % 3 == 0 { None } else { Some((k * 0.07) % 1.0) },
            ));
        }
        StaticMetricsProvider::new(records)
    }

    fn builtin_ranker(provider: StaticMetricsProvider) -> Ranker {
        Ranker::with_builtin_tables(Arc::new(provider))
    }

    struct FailingProvider;

    #[async_trait::async_trait]
    impl MetricsProvider for FailingProvider {
        fn provider_name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_metrics(&self, _tickers: &[InstrumentId]) -> anyhow::Result<Vec<RawMetrics>> {
            anyhow::bail!("upstream unavailable")
        }
    }

    #[tokio::test]
    async fn output_is_sorted_and_filtered_for_every_level_and_region() {
        let ranker = builtin_ranker(synthetic_snapshot());
        let mut regions = ranker.catalog().regions().iter().map(|s| s.to_string()).collect::<Vec<_>>();
        regions.push(ANY_REGION.to_string());

        for level in [RiskLevel::DEFENSIVE, RiskLevel::BALANCED, RiskLevel::GROWTH] {
            let config = ranker.risk_table().config_for(level).unwrap().clone();
            for region in &regions {
                for class in AssetClass::ALL {
                    let ranked = ranker.rank(region, class, level).await.unwrap();
                    for pair in ranked.windows(2) {
                        assert!(pair[0].score >= pair[1].score, "{region}/{class}/{level}");
                    }
                    for item in &ranked {
                        assert!(passes(&item.metrics, &config.filters));
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn ranking_is_idempotent() {
        let ranker = builtin_ranker(synthetic_snapshot());
        let first = ranker.rank(ANY_REGION, AssetClass::Etf, RiskLevel::BALANCED).await.unwrap();
        let second = ranker.rank(ANY_REGION, AssetClass::Etf, RiskLevel::BALANCED).await.unwrap();

        let key = |v: &[ScoredInstrument]| -> Vec<(String, u64)> {
            v.iter().map(|s| (s.ticker().to_string(), s.score.to_bits())).collect()
        };
        assert!(!first.is_empty());
        assert_eq!(key(&first), key(&second));
    }

    #[tokio::test]
    async fn reproduces_hand_computed_order_for_defensive_profile() {
        // Defensive weights: value 30, yield 30, growth 5, risk 25, esg 10.
        // ALPHA: 30*(15/30) + 30*(0.03/0.05) + 5*0.10 + 25*(0.75/1.5) + 10*0.8 = 15 + 18 + 0.5 + 12.5 + 8 = 54.0
        // BETA:  30*(10/30) + 30*(0.01/0.05) + 5*0.20 + 25*(0.6/1.5) + 10*0.5 = 10 + 6 + 1 + 10 + 5 = 32.0
        // GAMMA: value 0 (no pe) + 30*1.0 + 5*0 + 25*(0.5/1.5) + 10*0.9 = 30 + 8.333.. + 9 = 47.333..
        let catalog = UniverseCatalog::builder()
            .bucket("Testland", AssetClass::Stocks, ["ALPHA", "BETA", "GAMMA"])
            .build();
        let provider = StaticMetricsProvider::new([
            metrics("ALPHA", Some(15.0), Some(0.03), Some(0.10), Some(0.75), Some(0.8)),
            metrics("BETA", Some(20.0), Some(0.01), Some(0.20), Some(0.9), None),
            metrics("GAMMA", None, Some(0.06), None, None, Some(0.9)),
        ]);
        let ranker = Ranker::new(
            Arc::new(catalog),
            Arc::new(RiskProfileTable::builtin().clone()),
            Arc::new(provider),
        );

        let ranked = ranker
            .rank("Testland", AssetClass::Stocks, RiskLevel::DEFENSIVE)
            .await
            .unwrap();
        let order: Vec<_> = ranked.iter().map(|s| s.ticker()).collect();
        assert_eq!(order, ["ALPHA", "GAMMA", "BETA"]);

        assert!((ranked[0].score - 54.0).abs() < 1e-9);
        assert!((ranked[1].score - (30.0 + 25.0 / 3.0 + 9.0)).abs() < 1e-9);
        assert!((ranked[2].score - 32.0).abs() < 1e-9);
        assert_eq!(ranked[2].display.category, "Stocks");
    }

    #[tokio::test]
    async fn empty_european_bonds_universe_yields_empty_result() {
        let catalog = UniverseCatalog::builder()
            .bucket("Europe", AssetClass::Bonds, Vec::<String>::new())
            .bucket("Europe", AssetClass::Etf, ["IEUR"])
            .build();
        let ranker = Ranker::new(
            Arc::new(catalog),
            Arc::new(RiskProfileTable::builtin().clone()),
            Arc::new(FailingProvider),
        );

        // The provider is never consulted for an empty universe.
        let ranked = ranker.rank("Europe", AssetClass::Bonds, RiskLevel::GROWTH).await.unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn data_sparse_records_still_participate() {
        let ranker = builtin_ranker(StaticMetricsProvider::default());
        let ranked = ranker
            .rank("North America", AssetClass::Bonds, RiskLevel::DEFENSIVE)
            .await
            .unwrap();

        assert_eq!(ranked.len(), 15);
        assert!(ranked.iter().all(|s| s.metrics.is_empty()));
        // Identical scores: catalog order is kept.
        let order: Vec<_> = ranked.iter().map(|s| s.ticker().to_string()).collect();
        assert_eq!(order, ranker.catalog().lookup("North America", AssetClass::Bonds));
    }

    #[tokio::test]
    async fn everything_filtered_out_is_empty_not_error() {
        let catalog = UniverseCatalog::builder()
            .bucket("Europe", AssetClass::Stocks, ["HOT1", "HOT2"])
            .build();
        let provider = StaticMetricsProvider::new([
            metrics("HOT1", Some(40.0), None, None, Some(1.9), None),
            metrics("HOT2", None, None, None, Some(1.6), None),
        ]);
        let ranker = Ranker::new(
            Arc::new(catalog),
            Arc::new(RiskProfileTable::builtin().clone()),
            Arc::new(provider),
        );
        let ranked = ranker.rank("Europe", AssetClass::Stocks, RiskLevel::DEFENSIVE).await.unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn unconfigured_level_fails_before_fetching() {
        let ranker = builtin_ranker(synthetic_snapshot());
        let err = ranker.rank("Europe", AssetClass::Etf, RiskLevel(4)).await.unwrap_err();
        assert!(matches!(err, AdvisorError::UnknownRiskLevel(4)));
    }

    #[tokio::test]
    async fn unreachable_metrics_service_still_ranks_data_sparse_records() {
        let provider = HttpJsonMetricsProvider::new("http://127.0.0.1:1", None, Duration::from_secs(2))
            .unwrap()
            .with_retries(1);
        let ranker = Ranker::with_builtin_tables(Arc::new(provider));

        let ranked = ranker.rank("Europe", AssetClass::Etf, RiskLevel::BALANCED).await.unwrap();
        assert_eq!(ranked.len(), 15);
        assert!(ranked.iter().all(|s| s.metrics.is_empty()));
        let order: Vec<_> = ranked.iter().map(|s| s.ticker().to_string()).collect();
        assert_eq!(order, ranker.catalog().lookup("Europe", AssetClass::Etf));
    }

    #[tokio::test]
    async fn provider_that_returns_an_error_is_reported() {
        let ranker = Ranker::with_builtin_tables(Arc::new(FailingProvider));
        let err = ranker.rank("Europe", AssetClass::Etf, RiskLevel::BALANCED).await.unwrap_err();
        assert!(matches!(err, AdvisorError::MetricsProvider(_)));
    }

    #[tokio::test]
    async fn top_n_and_esg_only_narrow_the_result() {
        let ranker = builtin_ranker(synthetic_snapshot());
        let opts = RankOptions {
            esg_only: true,
            top_n: Some(3),
        };
        let ranked = ranker
            .rank_with("Europe", AssetClass::Etf, RiskLevel::GROWTH, opts)
            .await
            .unwrap();
        assert!(ranked.len() <= 3);

        let sleeve = ranker.catalog().lookup_filtered("Europe", AssetClass::Etf, true);
        assert!(ranked.iter().all(|s| sleeve.contains(&s.metrics.ticker)));
    }

    #[test]
    fn inclusive_yield_floor_applies_inside_ranking() {
        let config = RiskConfiguration {
            level: RiskLevel(9),
            weights: FactorWeights {
                value: 0.0,
                dividend_yield: 100.0,
                growth: 0.0,
                risk: 0.0,
                esg: 0.0,
            },
            filters: FilterSet::from([(MetricField::DividendYield, Bounds::at_least(0.02))]),
        };
        let records = vec![
            metrics("BELOW", None, Some(0.019), None, None, None),
            metrics("EDGE", None, Some(0.02), None, None, None),
        ];
        let ranked = rank_records(UniverseCatalog::builtin(), AssetClass::Bonds, &config, records);
        let tickers: Vec<_> = ranked.iter().map(|s| s.ticker()).collect();
        assert_eq!(tickers, ["EDGE"]);
        assert!((ranked[0].score - 40.0).abs() < 1e-9);
    }
}
