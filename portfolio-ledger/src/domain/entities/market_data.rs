//! Transient records returned by market-data providers. Never persisted.

use crate::domain::value_objects::{Country, Symbol};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a symbol search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolLookup {
    pub symbol: Symbol,
    pub name: String,
    /// Classification exactly as the provider spells it (e.g. `"Common Stock"`)
    pub raw_type: String,
    pub sector: Option<String>,
    pub country: Country,
}

/// Current price snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPrice {
    pub symbol: Symbol,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    /// Last traded price
    pub current: Decimal,
    pub previous_close: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl SymbolPrice {
    /// Change against the previous close, in percent
    pub fn change_percent(&self) -> Decimal {
        if self.previous_close.is_zero() {
            return Decimal::ZERO;
        }
        (self.current - self.previous_close) / self.previous_close * Decimal::ONE_HUNDRED
    }
}

/// Company profile used to refine US equity classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub industry: Option<String>,
}
