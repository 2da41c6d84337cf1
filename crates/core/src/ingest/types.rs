use serde::{Deserialize, Serialize};

pub type InstrumentId = String;

/// Batch response of the metrics provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub items: Vec<RawMetrics>,
}

/// Market metrics for one instrument. `None` means unknown, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
    pub ticker: InstrumentId,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub trailing_pe: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub revenue_growth: Option<f64>,
    #[serde(default)]
    pub earnings_growth: Option<f64>,
    #[serde(default)]
    pub esg_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    MarketCap,
    TrailingPe,
    DividendYield,
    Beta,
    RevenueGrowth,
    EarningsGrowth,
    EsgScore,
}

impl MetricField {
    pub const ALL: [MetricField; 7] = [
        MetricField::MarketCap,
        MetricField::TrailingPe,
        MetricField::DividendYield,
        MetricField::Beta,
        MetricField::RevenueGrowth,
        MetricField::EarningsGrowth,
        MetricField::EsgScore,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricField::MarketCap => "market_cap",
            MetricField::TrailingPe => "trailing_pe",
            MetricField::DividendYield => "dividend_yield",
            MetricField::Beta => "beta",
            MetricField::RevenueGrowth => "revenue_growth",
            MetricField::EarningsGrowth => "earnings_growth",
            MetricField::EsgScore => "esg_score",
        }
    }
}

impl std::fmt::Display for MetricField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RawMetrics {
    /// Record for an instrument the provider knows nothing about.
    pub fn missing(ticker: impl Into<InstrumentId>) -> Self {
        Self {
            ticker: ticker.into(),
            market_cap: None,
            trailing_pe: None,
            dividend_yield: None,
            beta: None,
            revenue_growth: None,
            earnings_growth: None,
            esg_score: None,
        }
    }

    pub fn get(&self, field: MetricField) -> Option<f64> {
        match field {
            MetricField::MarketCap => self.market_cap,
            MetricField::TrailingPe => self.trailing_pe,
            MetricField::DividendYield => self.dividend_yield,
            MetricField::Beta => self.beta,
            MetricField::RevenueGrowth => self.revenue_growth,
            MetricField::EarningsGrowth => self.earnings_growth,
            MetricField::EsgScore => self.esg_score,
        }
    }

    pub fn is_empty(&self) -> bool {
        MetricField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}
