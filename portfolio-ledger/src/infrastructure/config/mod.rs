//! Configuration loading for the portfolio ledger
//!
//! Supports JSON configuration files for:
//! - Market-data providers (finnhub, brapi, static tables) in priority order
//! - Price batch limits (deadline, concurrency)
//! - Brokerages seeded at startup

use crate::domain::{Country, Symbol};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Root configuration for the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Instance name, used in logs
    #[serde(default = "default_ledger_name")]
    pub name: String,

    #[serde(default)]
    pub market_data: MarketDataConfig,

    /// Brokerages available to every user
    #[serde(default)]
    pub brokerages: Vec<BrokerageConfig>,
}

fn default_ledger_name() -> String {
    "Portfolio Ledger".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: default_ledger_name(),
            market_data: MarketDataConfig::default(),
            brokerages: Vec::new(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.market_data.validate()?;

        let mut seen = HashSet::new();
        for brokerage in &self.brokerages {
            if brokerage.name.trim().is_empty() {
                return Err(ConfigError::InvalidBrokerage(
                    "brokerage name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(brokerage.name.as_str()) {
                return Err(ConfigError::InvalidBrokerage(format!(
                    "duplicate brokerage {}",
                    brokerage.name
                )));
            }
        }
        Ok(())
    }
}

/// Market-data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// Deadline for one batch of price lookups
    #[serde(default = "default_price_deadline_ms")]
    pub price_deadline_ms: u64,

    /// Maximum concurrent price lookups per batch
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Providers, highest priority first
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

fn default_price_deadline_ms() -> u64 {
    5000
}

fn default_max_in_flight() -> usize {
    8
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            price_deadline_ms: default_price_deadline_ms(),
            max_in_flight: default_max_in_flight(),
            providers: Vec::new(),
        }
    }
}

impl MarketDataConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.price_deadline_ms == 0 {
            return Err(ConfigError::InvalidMarketData(
                "price_deadline_ms must be positive".to_string(),
            ));
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::InvalidMarketData(
                "max_in_flight must be positive".to_string(),
            ));
        }
        for provider in &self.providers {
            provider.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Finnhub,
    Brapi,
    Static,
}

/// One market-data provider entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,

    /// Override for the provider's public endpoint
    #[serde(default)]
    pub base_url: Option<String>,

    /// Literal API key. Prefer `api_key_env` outside local setups.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,

    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,

    /// Listings served by a `static` provider
    #[serde(default)]
    pub symbols: Vec<StaticSymbolConfig>,
}

fn default_provider_timeout_ms() -> u64 {
    3000
}

impl ProviderConfig {
    /// Literal key first, then the named environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| {
                self.api_key_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
            })
            .filter(|key| !key.trim().is_empty())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidProvider(format!(
                "{:?}: timeout_ms must be positive",
                self.kind
            )));
        }
        match self.kind {
            ProviderKind::Static => {
                for entry in &self.symbols {
                    Symbol::new(entry.symbol.as_str()).map_err(|e| {
                        ConfigError::InvalidProvider(format!("static symbol {}: {}", entry.symbol, e))
                    })?;
                }
            }
            ProviderKind::Finnhub | ProviderKind::Brapi => {
                if !self.symbols.is_empty() {
                    return Err(ConfigError::InvalidProvider(format!(
                        "{:?}: symbols are only accepted by static providers",
                        self.kind
                    )));
                }
                if self.kind == ProviderKind::Finnhub
                    && self.api_key.is_none()
                    && self.api_key_env.is_none()
                {
                    return Err(ConfigError::InvalidProvider(
                        "finnhub requires api_key or api_key_env".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Listing served by a static provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticSymbolConfig {
    pub symbol: String,
    pub country: Country,
    pub name: String,
    /// Provider classification, e.g. "Common Stock" or "fii"
    #[serde(rename = "type")]
    pub raw_type: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// Brokerage seed entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerageConfig {
    pub name: String,
    pub country: Country,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid market data config: {0}")]
    InvalidMarketData(String),

    #[error("Invalid provider config: {0}")]
    InvalidProvider(String),

    #[error("Invalid brokerage config: {0}")]
    InvalidBrokerage(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_minimal_config() {
        let config = LedgerConfig::from_json("{}").unwrap();
        assert_eq!(config.name, "Portfolio Ledger");
        assert_eq!(config.market_data.price_deadline_ms, 5000);
        assert_eq!(config.market_data.max_in_flight, 8);
        assert!(config.market_data.providers.is_empty());
    }

    #[test]
    fn test_parse_providers_and_brokerages() {
        let json = r#"{
            "market_data": {
                "price_deadline_ms": 1500,
                "providers": [
                    { "kind": "brapi", "api_key_env": "BRAPI_TOKEN" },
                    {
                        "kind": "static",
                        "symbols": [
                            { "symbol": "ITSA4", "country": "BR", "name": "Itausa PN",
                              "type": "stock", "sector": "Finance", "price": "10.25" }
                        ]
                    }
                ]
            },
            "brokerages": [
                { "name": "Clear", "country": "BR" },
                { "name": "Avenue", "country": "US" }
            ]
        }"#;

        let config = LedgerConfig::from_json(json).unwrap();
        assert_eq!(config.market_data.price_deadline_ms, 1500);
        assert_eq!(config.market_data.providers[0].kind, ProviderKind::Brapi);
        assert_eq!(config.market_data.providers[0].timeout_ms, 3000);

        let listing = &config.market_data.providers[1].symbols[0];
        assert_eq!(listing.country, Country::Br);
        assert_eq!(listing.raw_type, "stock");
        assert_eq!(listing.price, Some(dec!(10.25)));
        assert_eq!(config.brokerages[1].country, Country::Us);
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let err = LedgerConfig::from_json(r#"{ "market_data": { "max_in_flight": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMarketData(_)));
    }

    #[test]
    fn test_finnhub_requires_key() {
        let err =
            LedgerConfig::from_json(r#"{ "market_data": { "providers": [ { "kind": "finnhub" } ] } }"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProvider(_)));
    }

    #[test]
    fn test_rejects_duplicate_brokerage() {
        let json = r#"{ "brokerages": [
            { "name": "Clear", "country": "BR" },
            { "name": "Clear", "country": "BR" }
        ] }"#;
        assert!(matches!(
            LedgerConfig::from_json(json),
            Err(ConfigError::InvalidBrokerage(_))
        ));
    }

    #[test]
    fn test_unknown_provider_kind() {
        let json = r#"{ "market_data": { "providers": [ { "kind": "yahoo" } ] } }"#;
        assert!(matches!(
            LedgerConfig::from_json(json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_literal_key_wins() {
        let provider = ProviderConfig {
            kind: ProviderKind::Finnhub,
            base_url: None,
            api_key: Some("abc".to_string()),
            api_key_env: Some("PORTFOLIO_LEDGER_UNSET_VARIABLE".to_string()),
            timeout_ms: 1000,
            symbols: Vec::new(),
        };
        assert_eq!(provider.resolve_api_key().as_deref(), Some("abc"));
    }
}
