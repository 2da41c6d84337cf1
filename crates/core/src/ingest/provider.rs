use crate::config::Settings;
use crate::ingest::types::{InstrumentId, MetricsResponse, RawMetrics};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PATH: &str = "/v1/metrics";
const DEFAULT_RETRIES: u32 = 3;

/// Batch source of per-instrument market metrics.
///
/// Implementations return one record per requested identifier, in request
/// order. Tickers the source cannot resolve come back as
/// [`RawMetrics::missing`] rather than being dropped.
#[async_trait::async_trait]
pub trait MetricsProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_metrics(&self, tickers: &[InstrumentId]) -> Result<Vec<RawMetrics>>;
}

#[derive(Debug, Clone)]
pub struct HttpJsonMetricsProvider {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    path: String,
    retries: u32,
}

impl HttpJsonMetricsProvider {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_metrics_provider_base_url()?;

        let timeout_secs = std::env::var("METRICS_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retries = std::env::var("METRICS_PROVIDER_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_RETRIES);

        let path = std::env::var("METRICS_PROVIDER_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        Ok(Self::new(
            base_url,
            settings.metrics_provider_api_key.as_deref(),
            Duration::from_secs(timeout_secs),
        )?
        .with_retries(retries)
        .with_path(path))
    }

    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = api_key {
            headers.insert(
                "x-api-key",
                HeaderValue::from_str(api_key)
                    .context("METRICS_PROVIDER_API_KEY is not a valid header value")?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build metrics provider http client")?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            headers,
            path: DEFAULT_PATH.to_string(),
            retries: DEFAULT_RETRIES,
        })
    }

    /// Total attempts per batch; at least one.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries.max(1);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    fn url(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn fetch_once(&self, tickers: &[&str]) -> Result<MetricsResponse> {
        let url = self.url();

        let res = self
            .http
            .get(url)
            .headers(self.headers.clone())
            .query(&[("tickers", tickers.join(","))])
            .send()
            .await
            .context("metrics provider request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read metrics provider response")?;
        let raw_json = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("metrics provider response is not valid JSON: {text}"))?;

        if !status.is_success() {
            anyhow::bail!("metrics provider HTTP {status}: {raw_json}");
        }

        serde_json::from_value::<MetricsResponse>(raw_json)
            .context("failed to parse metrics provider response into MetricsResponse")
    }
}

/// Request order, each ticker once.
fn unique_tickers(tickers: &[InstrumentId]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(tickers.len());
    tickers
        .iter()
        .map(String::as_str)
        .filter(|t| seen.insert(*t))
        .collect()
}

#[async_trait::async_trait]
impl MetricsProvider for HttpJsonMetricsProvider {
    fn provider_name(&self) -> &'static str {
        "external_http_json"
    }

    /// Never fails on transport errors: once retries are exhausted every
    /// requested ticker comes back as an all-absent record.
    async fn fetch_metrics(&self, tickers: &[InstrumentId]) -> Result<Vec<RawMetrics>> {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }

        let unique = unique_tickers(tickers);
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.fetch_once(&unique).await {
                Ok(resp) => return Ok(align_to_request(tickers, resp.items)),
                Err(err) if attempt >= self.retries => {
                    tracing::warn!(
                        attempt,
                        requested = unique.len(),
                        error = %format!("{err:#}"),
                        "metrics fetch failed; treating every ticker as unknown"
                    );
                    return Ok(tickers.iter().map(|t| RawMetrics::missing(t.clone())).collect());
                }
                Err(err) => {
                    let backoff = Duration::from_secs(1 << (attempt - 1));
                    tracing::warn!(attempt, ?backoff, error = %err, "metrics fetch failed; retrying");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

/// Fixed snapshot of metrics, e.g. loaded from a JSON file for offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticMetricsProvider {
    records: HashMap<InstrumentId, RawMetrics>,
}

impl StaticMetricsProvider {
    pub fn new(records: impl IntoIterator<Item = RawMetrics>) -> Self {
        let records = records
            .into_iter()
            .map(|r| (r.ticker.clone(), r))
            .collect();
        Self { records }
    }

    /// Accepts either a bare array of records or a `{"items": [...]}` response body.
    pub fn from_json(text: &str) -> Result<Self> {
        let value = serde_json::from_str::<Value>(text).context("metrics snapshot is not valid JSON")?;
        let items = match value {
            Value::Array(_) => serde_json::from_value::<Vec<RawMetrics>>(value)
                .context("failed to parse metrics snapshot array")?,
            other => {
                serde_json::from_value::<MetricsResponse>(other)
                    .context("failed to parse metrics snapshot object")?
                    .items
            }
        };
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl MetricsProvider for StaticMetricsProvider {
    fn provider_name(&self) -> &'static str {
        "static_snapshot"
    }

    async fn fetch_metrics(&self, tickers: &[InstrumentId]) -> Result<Vec<RawMetrics>> {
        Ok(tickers
            .iter()
            .map(|t| {
                self.records
                    .get(t)
                    .cloned()
                    .unwrap_or_else(|| RawMetrics::missing(t.clone()))
            })
            .collect())
    }
}

/// Reorders `items` to match `tickers`, filling gaps with all-absent records.
///
/// A ticker requested twice (the "Any" region can repeat one) receives the
/// same record each time.
pub fn align_to_request(tickers: &[InstrumentId], items: Vec<RawMetrics>) -> Vec<RawMetrics> {
    let mut by_ticker: HashMap<InstrumentId, RawMetrics> = HashMap::with_capacity(items.len());
    for item in items {
        let key = item.ticker.trim().to_string();
        by_ticker.entry(key).or_insert(item);
    }

    tickers
        .iter()
        .map(|t| match by_ticker.get(t) {
            Some(found) => found.clone(),
            None => {
                tracing::debug!(ticker = %t, "no metrics returned; treating all fields as unknown");
                RawMetrics::missing(t.clone())
            }
        })
        .collect()
}
