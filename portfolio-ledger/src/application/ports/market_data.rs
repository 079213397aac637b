use crate::domain::{CompanyProfile, Country, Symbol, SymbolLookup, SymbolPrice};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by an external market-data source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Symbol not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No provider serves market {0}")]
    UnsupportedMarket(Country),

    #[error("Timed out after {0}ms")]
    Timeout(u64),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

/// One external market-data source.
///
/// Implementations normalize their wire formats into the domain records;
/// classification strings are passed through untouched in
/// [`SymbolLookup::raw_type`].
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Markets this provider can answer for
    fn markets(&self) -> &[Country];

    async fn lookup_symbol(
        &self,
        symbol: &Symbol,
        country: Country,
    ) -> Result<SymbolLookup, ProviderError>;

    async fn price(&self, symbol: &Symbol, country: Country) -> Result<SymbolPrice, ProviderError>;

    /// Company profile for classification refinement. Providers without
    /// profile data return `Ok(None)`.
    async fn company_profile(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<CompanyProfile>, ProviderError> {
        let _ = symbol;
        Ok(None)
    }
}
