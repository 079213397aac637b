use crate::application::ports::{MarketDataProvider, ProviderError};
use crate::domain::{CompanyProfile, Country, Symbol, SymbolLookup, SymbolPrice};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// One symbol served by [`StaticMarketData`]
#[derive(Debug, Clone)]
pub struct StaticListing {
    pub lookup: SymbolLookup,
    pub price: Option<Decimal>,
    pub profile: Option<CompanyProfile>,
}

impl StaticListing {
    pub fn new(
        symbol: Symbol,
        country: Country,
        name: impl Into<String>,
        raw_type: impl Into<String>,
    ) -> Self {
        StaticListing {
            lookup: SymbolLookup {
                symbol,
                name: name.into(),
                raw_type: raw_type.into(),
                sector: None,
                country,
            },
            price: None,
            profile: None,
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.lookup.sector = Some(sector.into());
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.profile = Some(CompanyProfile {
            name: Some(self.lookup.name.clone()),
            industry: Some(industry.into()),
        });
        self
    }
}

/// Market-data provider answering from a fixed, config-seeded table
///
/// Prices can be made to fail or stall per symbol, which is how
/// the batch-pricing paths are exercised without a network.
pub struct StaticMarketData {
    listings: Arc<DashMap<(Country, Symbol), StaticListing>>,
    failing: Arc<DashMap<Symbol, ProviderError>>,
    delays: Arc<DashMap<Symbol, Duration>>,
    markets: Vec<Country>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self {
            listings: Arc::new(DashMap::new()),
            failing: Arc::new(DashMap::new()),
            delays: Arc::new(DashMap::new()),
            markets: Country::ALL.to_vec(),
        }
    }

    pub fn with_listings(listings: impl IntoIterator<Item = StaticListing>) -> Self {
        let provider = Self::new();
        for listing in listings {
            provider.add(listing);
        }
        provider
    }

    pub fn add(&self, listing: StaticListing) {
        let key = (listing.lookup.country, listing.lookup.symbol.clone());
        self.listings.insert(key, listing);
    }

    /// Make every price request for `symbol` fail with `error`
    pub fn fail_price(&self, symbol: Symbol, error: ProviderError) {
        self.failing.insert(symbol, error);
    }

    /// Make every price request for `symbol` sleep before answering
    pub fn delay_price(&self, symbol: Symbol, delay: Duration) {
        self.delays.insert(symbol, delay);
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    fn listing(&self, symbol: &Symbol, country: Country) -> Result<StaticListing, ProviderError> {
        self.listings
            .get(&(country, symbol.clone()))
            .map(|l| l.value().clone())
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))
    }
}

impl Default for StaticMarketData {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StaticMarketData {
    fn clone(&self) -> Self {
        Self {
            listings: Arc::clone(&self.listings),
            failing: Arc::clone(&self.failing),
            delays: Arc::clone(&self.delays),
            markets: self.markets.clone(),
        }
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketData {
    fn name(&self) -> &str {
        "static"
    }

    fn markets(&self) -> &[Country] {
        &self.markets
    }

    async fn lookup_symbol(
        &self,
        symbol: &Symbol,
        country: Country,
    ) -> Result<SymbolLookup, ProviderError> {
        self.listing(symbol, country).map(|l| l.lookup)
    }

    async fn price(&self, symbol: &Symbol, country: Country) -> Result<SymbolPrice, ProviderError> {
        let delay = self.delays.get(symbol).map(|d| *d.value());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failing.get(symbol) {
            return Err(err.value().clone());
        }

        let listing = self.listing(symbol, country)?;
        let current = listing
            .price
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))?;
        Ok(SymbolPrice {
            symbol: symbol.clone(),
            open: current,
            high: current,
            low: current,
            current,
            previous_close: current,
            timestamp: Utc::now(),
        })
    }

    async fn company_profile(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<CompanyProfile>, ProviderError> {
        Ok(self
            .listings
            .iter()
            .find(|l| &l.lookup.symbol == symbol)
            .and_then(|l| l.profile.clone()))
    }
}
