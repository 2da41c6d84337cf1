pub mod asset;
pub mod contract;
pub mod recommendation;

pub use asset::AssetClass;
pub use recommendation::{DisplayInfo, PrimaryInstrument, RecommendationResult, ScoredInstrument};
