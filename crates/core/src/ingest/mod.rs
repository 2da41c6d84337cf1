pub mod provider;
pub mod types;

pub use provider::{HttpJsonMetricsProvider, MetricsProvider, StaticMetricsProvider};
pub use types::{InstrumentId, MetricField, RawMetrics};
