use crate::error::AdvisorError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Bonds,
    Etf,
    Stocks,
}

impl AssetClass {
    pub const ALL: [AssetClass; 3] = [AssetClass::Bonds, AssetClass::Etf, AssetClass::Stocks];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetClass::Bonds => "bonds",
            AssetClass::Etf => "etf",
            AssetClass::Stocks => "stocks",
        }
    }

    /// Category shown for instruments without display metadata: the key with
    /// its first letter upper-cased.
    pub fn label(self) -> &'static str {
        match self {
            AssetClass::Bonds => "Bonds",
            AssetClass::Etf => "Etf",
            AssetClass::Stocks => "Stocks",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bonds" | "bond" => Ok(AssetClass::Bonds),
            "etf" | "etfs" => Ok(AssetClass::Etf),
            "stocks" | "stock" => Ok(AssetClass::Stocks),
            _ => Err(AdvisorError::InvalidAssetClass(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("ETF".parse::<AssetClass>().unwrap(), AssetClass::Etf);
        assert_eq!(" Bonds ".parse::<AssetClass>().unwrap(), AssetClass::Bonds);
        assert!("crypto".parse::<AssetClass>().unwrap_err().is_input());
    }

    #[test]
    fn label_capitalises_key() {
        for class in AssetClass::ALL {
            let key = class.as_str();
            let expected = format!("{}{}", key[..1].to_uppercase(), &key[1..]);
            assert_eq!(class.label(), expected);
        }
    }
}
