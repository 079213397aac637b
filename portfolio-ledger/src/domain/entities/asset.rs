use crate::domain::value_objects::{
    AssetId, AssetKind, AssetTypeId, Country, SectorId, ShareClass, Symbol,
};
use serde::{Deserialize, Serialize};

/// Classification row shared by every asset of one kind in one market
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetType {
    pub id: AssetTypeId,
    pub kind: AssetKind,
    pub name: String,
    pub country: Country,
}

impl AssetType {
    pub fn new(kind: AssetKind, country: Country) -> Self {
        AssetType {
            id: AssetTypeId::new_v4(),
            kind,
            name: Self::display_name(kind, country).to_string(),
            country,
        }
    }

    pub fn display_name(kind: AssetKind, country: Country) -> &'static str {
        match (kind, country) {
            (AssetKind::Stock, Country::Br) => "Brazilian Stocks",
            (AssetKind::Etf, Country::Br) => "Brazilian ETFs",
            (AssetKind::Reit, Country::Br) => "Brazilian Real Estate Funds",
            (AssetKind::Fund, Country::Br) => "Brazilian Funds",
            (AssetKind::Stock, Country::Us) => "US Stocks",
            (AssetKind::Etf, Country::Us) => "US ETFs",
            (AssetKind::Reit, Country::Us) => "US REITs",
            (AssetKind::Fund, Country::Us) => "US Funds",
        }
    }
}

/// Industry grouping, keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: SectorId,
    pub name: String,
}

impl Sector {
    pub fn new(name: impl Into<String>) -> Self {
        Sector {
            id: SectorId::new_v4(),
            name: name.into(),
        }
    }
}

/// A listed instrument, created once per symbol and shared by all users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub symbol: Symbol,
    pub name: String,
    pub preference: Option<ShareClass>,
    pub asset_type: AssetType,
    pub sector: Sector,
}

impl Asset {
    pub fn new(
        symbol: Symbol,
        name: impl Into<String>,
        preference: Option<ShareClass>,
        asset_type: AssetType,
        sector: Sector,
    ) -> Self {
        Asset {
            id: AssetId::new_v4(),
            symbol,
            name: name.into(),
            preference,
            asset_type,
            sector,
        }
    }

    pub fn country(&self) -> Country {
        self.asset_type.country
    }

    pub fn kind(&self) -> AssetKind {
        self.asset_type.kind
    }
}
