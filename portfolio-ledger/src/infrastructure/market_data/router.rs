use super::{
    BRAPI_BASE_URL, BrapiClient, FINNHUB_BASE_URL, FinnhubClient, StaticListing,
    StaticMarketData,
};
use crate::application::ports::{MarketDataProvider, ProviderError};
use crate::domain::{CompanyProfile, Country, Symbol, SymbolLookup, SymbolPrice};
use crate::infrastructure::config::{
    ConfigError, MarketDataConfig, ProviderConfig, ProviderKind, StaticSymbolConfig,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Routes market-data calls across providers in priority order.
///
/// Only providers serving the requested country are tried. A `NotFound`
/// answer is authoritative and returned immediately; any other failure
/// falls through to the next candidate. When every candidate fails the
/// last error is returned.
pub struct MarketDataRouter {
    providers: Vec<Arc<dyn MarketDataProvider>>,
    markets: Vec<Country>,
}

impl MarketDataRouter {
    pub fn new(providers: Vec<Arc<dyn MarketDataProvider>>) -> Self {
        let mut markets: Vec<Country> = Vec::new();
        for country in providers.iter().flat_map(|p| p.markets().iter().copied()) {
            if !markets.contains(&country) {
                markets.push(country);
            }
        }
        Self { providers, markets }
    }

    /// Build every configured provider, keeping configuration order
    pub fn from_config(config: &MarketDataConfig) -> Result<Self, ConfigError> {
        let providers = config
            .providers
            .iter()
            .map(build_provider)
            .collect::<Result<Vec<_>, _>>()?;
        let router = Self::new(providers);
        info!(providers = ?router.provider_names(), "Market data router ready");
        Ok(router)
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    fn candidates(&self, country: Country) -> impl Iterator<Item = &Arc<dyn MarketDataProvider>> {
        self.providers
            .iter()
            .filter(move |p| p.markets().contains(&country))
    }
}

fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn MarketDataProvider>, ConfigError> {
    let timeout = Duration::from_millis(config.timeout_ms);
    let provider: Arc<dyn MarketDataProvider> = match config.kind {
        ProviderKind::Finnhub => {
            let api_key = config.resolve_api_key().ok_or_else(|| {
                ConfigError::InvalidProvider("finnhub API key is not set".to_string())
            })?;
            let base_url = config.base_url.as_deref().unwrap_or(FINNHUB_BASE_URL);
            Arc::new(
                FinnhubClient::new(base_url, api_key, timeout)
                    .map_err(|e| ConfigError::InvalidProvider(e.to_string()))?,
            )
        }
        ProviderKind::Brapi => {
            let base_url = config.base_url.as_deref().unwrap_or(BRAPI_BASE_URL);
            Arc::new(
                BrapiClient::new(base_url, config.resolve_api_key(), timeout)
                    .map_err(|e| ConfigError::InvalidProvider(e.to_string()))?,
            )
        }
        ProviderKind::Static => {
            let listings = config
                .symbols
                .iter()
                .map(static_listing)
                .collect::<Result<Vec<_>, _>>()?;
            Arc::new(StaticMarketData::with_listings(listings))
        }
    };
    Ok(provider)
}

fn static_listing(entry: &StaticSymbolConfig) -> Result<StaticListing, ConfigError> {
    let symbol = Symbol::new(entry.symbol.as_str())
        .map_err(|e| ConfigError::InvalidProvider(format!("static symbol {}: {}", entry.symbol, e)))?;
    let mut listing = StaticListing::new(symbol, entry.country, entry.name.as_str(), entry.raw_type.as_str());
    if let Some(sector) = &entry.sector {
        listing = listing.with_sector(sector.as_str());
    }
    if let Some(industry) = &entry.industry {
        listing = listing.with_industry(industry.as_str());
    }
    if let Some(price) = entry.price {
        listing = listing.with_price(price);
    }
    Ok(listing)
}

#[async_trait]
impl MarketDataProvider for MarketDataRouter {
    fn name(&self) -> &str {
        "router"
    }

    fn markets(&self) -> &[Country] {
        &self.markets
    }

    async fn lookup_symbol(
        &self,
        symbol: &Symbol,
        country: Country,
    ) -> Result<SymbolLookup, ProviderError> {
        let mut last_err = ProviderError::UnsupportedMarket(country);
        for provider in self.candidates(country) {
            match provider.lookup_symbol(symbol, country).await {
                Ok(lookup) => {
                    debug!(provider = provider.name(), symbol = %symbol, "symbol lookup served");
                    return Ok(lookup);
                }
                Err(err) if err.is_not_found() => return Err(err),
                Err(err) => {
                    warn!(provider = provider.name(), symbol = %symbol, error = %err, "symbol lookup failed, trying next provider");
                    last_err = err;
                }
            }
        }
        Err(last_err)
    }

    async fn price(&self, symbol: &Symbol, country: Country) -> Result<SymbolPrice, ProviderError> {
        let mut last_err = ProviderError::UnsupportedMarket(country);
        for provider in self.candidates(country) {
            match provider.price(symbol, country).await {
                Ok(price) => return Ok(price),
                Err(err) if err.is_not_found() => return Err(err),
                Err(err) => {
                    warn!(provider = provider.name(), symbol = %symbol, error = %err, "price request failed, trying next provider");
                    last_err = err;
                }
            }
        }
        Err(last_err)
    }

    async fn company_profile(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<CompanyProfile>, ProviderError> {
        let mut last_err = None;
        for provider in &self.providers {
            match provider.company_profile(symbol).await {
                Ok(Some(profile)) => return Ok(Some(profile)),
                Ok(None) => {}
                Err(err) => {
                    warn!(provider = provider.name(), symbol = %symbol, error = %err, "company profile failed");
                    last_err = Some(err);
                }
            }
        }
        match last_err {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn listing(price: rust_decimal::Decimal) -> StaticListing {
        StaticListing::new(sym("AAPL"), Country::Us, "Apple Inc", "Common Stock").with_price(price)
    }

    #[tokio::test]
    async fn test_falls_back_on_upstream_failure() {
        let primary = StaticMarketData::with_listings([listing(dec!(1))]);
        primary.fail_price(sym("AAPL"), ProviderError::Network("down".into()));
        let secondary = StaticMarketData::with_listings([listing(dec!(2))]);

        let providers: Vec<Arc<dyn MarketDataProvider>> =
            vec![Arc::new(primary), Arc::new(secondary)];
        let router = MarketDataRouter::new(providers);
        let price = router.price(&sym("AAPL"), Country::Us).await.unwrap();
        assert_eq!(price.current, dec!(2));
    }

    #[tokio::test]
    async fn test_not_found_is_authoritative() {
        let primary = StaticMarketData::new();
        let secondary = StaticMarketData::with_listings([listing(dec!(2))]);

        let providers: Vec<Arc<dyn MarketDataProvider>> =
            vec![Arc::new(primary), Arc::new(secondary)];
        let router = MarketDataRouter::new(providers);
        let err = router.price(&sym("AAPL"), Country::Us).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_from_config_builds_static_table() {
        let config = crate::infrastructure::LedgerConfig::from_json(
            r#"{ "market_data": { "providers": [ { "kind": "static", "symbols": [
                { "symbol": "hglg11", "country": "BR", "name": "CSHG Logistica", "type": "fii", "price": 160 }
            ] } ] } }"#,
        )
        .unwrap();
        let router = MarketDataRouter::from_config(&config.market_data).unwrap();
        assert_eq!(router.provider_names(), vec!["static"]);

        let lookup = router.lookup_symbol(&sym("HGLG11"), Country::Br).await.unwrap();
        assert_eq!(lookup.raw_type, "fii");
    }

    #[tokio::test]
    async fn test_no_provider_for_market() {
        let router = MarketDataRouter::new(Vec::new());
        let err = router
            .lookup_symbol(&sym("ITSA4"), Country::Br)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::UnsupportedMarket(Country::Br));
    }
}
