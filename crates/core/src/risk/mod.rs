//! Risk levels and the per-level scoring weights and hard filters.

mod table;

pub use table::{RiskConfiguration, RiskProfileTable};

use serde::{Deserialize, Serialize};

/// Discrete risk tier. Only levels present in a [`RiskProfileTable`] are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskLevel(pub u8);

impl RiskLevel {
    pub const DEFENSIVE: RiskLevel = RiskLevel(1);
    pub const BALANCED: RiskLevel = RiskLevel(3);
    pub const GROWTH: RiskLevel = RiskLevel(5);

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Defensive",
            2 => "Conservative",
            3 => "Balanced",
            4 => "Growth Tilt",
            5 => "Aggressive",
            _ => "Unknown",
        }
    }

    pub fn description(self) -> &'static str {
        match self.0 {
            1 => "Capital preservation first: low-beta, income-paying instruments.",
            2 => "Mostly stable holdings with a small growth sleeve.",
            3 => "Even trade-off between stability, income and growth.",
            4 => "Growth-leaning with some downside protection.",
            5 => "Growth first: accepts higher volatility for higher expected return.",
            _ => "No description available.",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for RiskLevel {
    fn from(v: u8) -> Self {
        RiskLevel(v)
    }
}
