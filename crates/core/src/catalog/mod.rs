//! Region × asset-class instrument universe, primary picks and display metadata.

mod data;

use crate::domain::{AssetClass, DisplayInfo, PrimaryInstrument};
use crate::ingest::types::InstrumentId;
use crate::risk::RiskLevel;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Region sentinel selecting every catalog region.
pub const ANY_REGION: &str = "Any";

/// Number of leading ESG-screened instruments in each bucket.
pub const ESG_SLEEVE_LEN: usize = 5;

#[derive(Debug, Clone)]
struct RegionUniverse {
    name: String,
    buckets: BTreeMap<AssetClass, Vec<InstrumentId>>,
    primaries: BTreeMap<RiskLevel, PrimaryInstrument>,
}

#[derive(Debug, Clone)]
pub struct UniverseCatalog {
    regions: Vec<RegionUniverse>,
    any_primary: PrimaryInstrument,
    products: HashMap<InstrumentId, DisplayInfo>,
}

static BUILTIN: OnceLock<UniverseCatalog> = OnceLock::new();

pub fn is_any_region(region: &str) -> bool {
    region.trim().eq_ignore_ascii_case(ANY_REGION)
}

impl UniverseCatalog {
    pub fn builtin() -> &'static UniverseCatalog {
        BUILTIN.get_or_init(data::builtin_catalog)
    }

    pub fn builder() -> UniverseCatalogBuilder {
        UniverseCatalogBuilder::default()
    }

    pub fn regions(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.name.as_str()).collect()
    }

    fn region(&self, region: &str) -> Option<&RegionUniverse> {
        let region = region.trim();
        self.regions
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(region))
    }

    /// Instruments for a region and asset class.
    ///
    /// `"Any"` concatenates every region in definition order without removing
    /// duplicates. An unknown region, or a bucket the catalog does not define,
    /// yields an empty list.
    pub fn lookup(&self, region: &str, asset_class: AssetClass) -> Vec<InstrumentId> {
        self.lookup_filtered(region, asset_class, false)
    }

    /// Like [`lookup`](Self::lookup), but with `esg_only` the list is cut to its
    /// leading [`ESG_SLEEVE_LEN`] ESG-screened entries. For `"Any"` the cut is
    /// applied once, after concatenation.
    pub fn lookup_filtered(
        &self,
        region: &str,
        asset_class: AssetClass,
        esg_only: bool,
    ) -> Vec<InstrumentId> {
        let take = if esg_only { ESG_SLEEVE_LEN } else { usize::MAX };
        let bucket = |r: &RegionUniverse| -> Vec<InstrumentId> {
            r.buckets.get(&asset_class).cloned().unwrap_or_default()
        };

        let full = if is_any_region(region) {
            self.regions.iter().flat_map(bucket).collect()
        } else {
            self.region(region).map(bucket).unwrap_or_default()
        };
        full.into_iter().take(take).collect()
    }

    /// Representative instrument for a region and risk level. `"Any"` always
    /// resolves to the fixed fallback; unresolvable pairs return `None`.
    pub fn primary_instrument(&self, region: &str, level: RiskLevel) -> Option<PrimaryInstrument> {
        if is_any_region(region) {
            return Some(self.any_primary.clone());
        }
        self.region(region)?.primaries.get(&level).cloned()
    }

    /// Display name and category, falling back to the raw ticker and the
    /// capitalised asset-class label when no metadata is known.
    pub fn display_info(&self, ticker: &str, asset_class: AssetClass) -> DisplayInfo {
        self.products
            .get(ticker)
            .cloned()
            .unwrap_or_else(|| DisplayInfo {
                name: ticker.to_string(),
                category: asset_class.label().to_string(),
            })
    }
}

#[derive(Debug, Clone)]
pub struct UniverseCatalogBuilder {
    regions: Vec<RegionUniverse>,
    any_primary: PrimaryInstrument,
    products: HashMap<InstrumentId, DisplayInfo>,
}

impl Default for UniverseCatalogBuilder {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            any_primary: PrimaryInstrument {
                profile_name: RiskLevel::BALANCED.label().to_string(),
                ticker: "EUNL.DE".to_string(),
            },
            products: HashMap::new(),
        }
    }
}

impl UniverseCatalogBuilder {
    fn region_mut(&mut self, name: &str) -> &mut RegionUniverse {
        let idx = match self.regions.iter().position(|r| r.name == name) {
            Some(idx) => idx,
            None => {
                self.regions.push(RegionUniverse {
                    name: name.to_string(),
                    buckets: BTreeMap::new(),
                    primaries: BTreeMap::new(),
                });
                self.regions.len() - 1
            }
        };
        &mut self.regions[idx]
    }

    /// Sets a bucket. Regions keep the order in which they are first mentioned.
    pub fn bucket<I, S>(mut self, region: &str, asset_class: AssetClass, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<InstrumentId>,
    {
        let tickers = tickers.into_iter().map(Into::into).collect();
        self.region_mut(region).buckets.insert(asset_class, tickers);
        self
    }

    pub fn primary(mut self, region: &str, level: RiskLevel, ticker: &str) -> Self {
        let primary = PrimaryInstrument {
            profile_name: level.label().to_string(),
            ticker: ticker.to_string(),
        };
        self.region_mut(region).primaries.insert(level, primary);
        self
    }

    pub fn any_primary(mut self, profile_name: &str, ticker: &str) -> Self {
        self.any_primary = PrimaryInstrument {
            profile_name: profile_name.to_string(),
            ticker: ticker.to_string(),
        };
        self
    }

    pub fn product(mut self, ticker: &str, name: &str, category: &str) -> Self {
        self.products.insert(
            ticker.to_string(),
            DisplayInfo {
                name: name.to_string(),
                category: category.to_string(),
            },
        );
        self
    }

    pub fn build(self) -> UniverseCatalog {
        UniverseCatalog {
            regions: self.regions,
            any_primary: self.any_primary,
            products: self.products,
        }
    }
}
