use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal asset classification shared by every provider vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetKind {
    Stock,
    Etf,
    Reit,
    Fund,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Stock => "STOCK",
            AssetKind::Etf => "ETF",
            AssetKind::Reit => "REIT",
            AssetKind::Fund => "FUND",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Share class encoded in a B3 ticker suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShareClass {
    /// Ordinary (voting) shares, suffix 3
    On,
    /// Preferred shares, suffix 4
    Pn,
    Pna,
    Pnb,
    Pnc,
    Pnd,
    /// Share bundles, suffix 11
    Unit,
}

impl ShareClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareClass::On => "ON",
            ShareClass::Pn => "PN",
            ShareClass::Pna => "PNA",
            ShareClass::Pnb => "PNB",
            ShareClass::Pnc => "PNC",
            ShareClass::Pnd => "PND",
            ShareClass::Unit => "UNIT",
        }
    }
}

impl fmt::Display for ShareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
