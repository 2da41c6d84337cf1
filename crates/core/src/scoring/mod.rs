//! Filter engine and factor scorer.

pub mod filter;
pub mod score;

pub use filter::{apply_filters, passes, Bounds, FilterSet};
pub use score::{factor_scores, score, FactorScores, FactorWeights, MissingPolicy};
