//! brapi.dev adapter for the Brazilian market.
//!
//! Symbol lookup goes through `/api/quote/list?search=` (which carries the
//! instrument type and sector); prices come from `/api/quote/{ticker}`.

use super::rest::{ApiAuth, RestClient, RestError};
use crate::application::ports::{MarketDataProvider, ProviderError};
use crate::domain::{Country, Symbol, SymbolLookup, SymbolPrice};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

pub const BRAPI_BASE_URL: &str = "https://brapi.dev";

const MARKETS: [Country; 1] = [Country::Br];

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    stocks: Vec<ListItem>,
}

#[derive(Deserialize)]
struct ListItem {
    stock: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    sector: Option<String>,
}

#[derive(Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    results: Vec<QuoteItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteItem {
    symbol: String,
    regular_market_price: Decimal,
    regular_market_day_high: Option<Decimal>,
    regular_market_day_low: Option<Decimal>,
    regular_market_open: Option<Decimal>,
    regular_market_previous_close: Option<Decimal>,
    regular_market_time: Option<DateTime<Utc>>,
}

pub struct BrapiClient {
    rest: RestClient,
}

impl BrapiClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let auth = match api_key {
            Some(token) => ApiAuth::Bearer(token),
            None => ApiAuth::None,
        };
        let rest = RestClient::new(base_url, auth, timeout)
            .map_err(|e| e.into_provider_error(timeout))?;
        Ok(BrapiClient { rest })
    }

    fn map_err(&self, err: RestError, symbol: &Symbol) -> ProviderError {
        match err {
            RestError::NotFound(_) => ProviderError::NotFound(symbol.to_string()),
            other => other.into_provider_error(self.rest.timeout()),
        }
    }

    fn ensure_market(country: Country) -> Result<(), ProviderError> {
        if MARKETS.contains(&country) {
            Ok(())
        } else {
            Err(ProviderError::UnsupportedMarket(country))
        }
    }
}

#[async_trait]
impl MarketDataProvider for BrapiClient {
    fn name(&self) -> &str {
        "brapi"
    }

    fn markets(&self) -> &[Country] {
        &MARKETS
    }

    async fn lookup_symbol(
        &self,
        symbol: &Symbol,
        country: Country,
    ) -> Result<SymbolLookup, ProviderError> {
        Self::ensure_market(country)?;
        let resp: ListResponse = self
            .rest
            .get("/api/quote/list", &[("search", symbol.as_str())])
            .await
            .map_err(|e| self.map_err(e, symbol))?;

        let item = resp
            .stocks
            .into_iter()
            .find(|item| item.stock.eq_ignore_ascii_case(symbol.as_str()))
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))?;

        Ok(SymbolLookup {
            symbol: symbol.clone(),
            name: item.name,
            raw_type: item.kind,
            sector: item.sector.filter(|s| !s.trim().is_empty()),
            country,
        })
    }

    async fn price(&self, symbol: &Symbol, country: Country) -> Result<SymbolPrice, ProviderError> {
        Self::ensure_market(country)?;
        let path = format!("/api/quote/{}", symbol);
        let resp: QuoteResponse = self
            .rest
            .get(&path, &[])
            .await
            .map_err(|e| self.map_err(e, symbol))?;

        let quote = resp
            .results
            .into_iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol.as_str()))
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))?;

        let current = quote.regular_market_price;
        Ok(SymbolPrice {
            symbol: symbol.clone(),
            open: quote.regular_market_open.unwrap_or(current),
            high: quote.regular_market_day_high.unwrap_or(current),
            low: quote.regular_market_day_low.unwrap_or(current),
            current,
            previous_close: quote.regular_market_previous_close.unwrap_or(current),
            timestamp: quote.regular_market_time.unwrap_or_else(Utc::now),
        })
    }
}
