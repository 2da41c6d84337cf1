pub mod advisor;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod questionnaire;
pub mod ranker;
pub mod risk;
pub mod scoring;

pub use error::{AdvisorError, Result};

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub metrics_provider_base_url: Option<String>,
        pub metrics_provider_api_key: Option<String>,
        pub risk_profiles_path: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                metrics_provider_base_url: std::env::var("METRICS_PROVIDER_BASE_URL").ok(),
                metrics_provider_api_key: std::env::var("METRICS_PROVIDER_API_KEY").ok(),
                risk_profiles_path: std::env::var("RISKFOLIO_RISK_PROFILES")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_metrics_provider_base_url(&self) -> anyhow::Result<&str> {
            self.metrics_provider_base_url
                .as_deref()
                .context("METRICS_PROVIDER_BASE_URL is required")
        }

        /// Builtin table unless `RISKFOLIO_RISK_PROFILES` points at a JSON override.
        pub fn load_risk_profiles(&self) -> anyhow::Result<crate::risk::RiskProfileTable> {
            let Some(path) = self.risk_profiles_path.as_deref() else {
                return Ok(crate::risk::RiskProfileTable::builtin().clone());
            };

            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read risk profiles from {path}"))?;
            let table = crate::risk::RiskProfileTable::from_json(&text)
                .with_context(|| format!("invalid risk profiles in {path}"))?;
            tracing::info!(path, levels = table.levels().len(), "loaded risk profile table");
            Ok(table)
        }
    }
}
