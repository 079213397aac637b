//! Finnhub adapter for the US market.
//!
//! Endpoints used: `/search`, `/quote` and `/stock/profile2`. The API key is
//! sent in the `X-Finnhub-Token` header.

use super::rest::{ApiAuth, RestClient, RestError};
use crate::application::ports::{MarketDataProvider, ProviderError};
use crate::domain::{CompanyProfile, Country, Symbol, SymbolLookup, SymbolPrice};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

pub const FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

const MARKETS: [Country; 1] = [Country::Us];

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    description: String,
    symbol: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct QuoteResponse {
    c: Decimal,
    h: Decimal,
    l: Decimal,
    o: Decimal,
    pc: Decimal,
    t: i64,
}

#[derive(Deserialize)]
struct ProfileResponse {
    name: Option<String>,
    #[serde(rename = "finnhubIndustry")]
    industry: Option<String>,
}

pub struct FinnhubClient {
    rest: RestClient,
}

impl FinnhubClient {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, ProviderError> {
        let auth = ApiAuth::Header {
            name: "X-Finnhub-Token",
            value: api_key,
        };
        let rest = RestClient::new(base_url, auth, timeout)
            .map_err(|e| e.into_provider_error(timeout))?;
        Ok(FinnhubClient { rest })
    }

    fn map_err(&self, err: RestError) -> ProviderError {
        err.into_provider_error(self.rest.timeout())
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
impl MarketDataProvider for FinnhubClient {
    fn name(&self) -> &str {
        "finnhub"
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
        let resp: SearchResponse = self
            .rest
            .get("/search", &[("q", symbol.as_str())])
            .await
            .map_err(|e| self.map_err(e))?;

        // Search is fuzzy; only an exact ticker match counts
        let item = resp
            .result
            .into_iter()
            .find(|item| item.symbol.eq_ignore_ascii_case(symbol.as_str()))
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))?;

        Ok(SymbolLookup {
            symbol: symbol.clone(),
            name: item.description,
            raw_type: item.kind,
            sector: None,
            country,
        })
    }

    async fn price(&self, symbol: &Symbol, country: Country) -> Result<SymbolPrice, ProviderError> {
        Self::ensure_market(country)?;
        let quote: QuoteResponse = self
            .rest
            .get("/quote", &[("symbol", symbol.as_str())])
            .await
            .map_err(|e| self.map_err(e))?;

        // Unknown tickers come back as an all-zero quote
        if quote.t == 0 && quote.c.is_zero() {
            return Err(ProviderError::NotFound(symbol.to_string()));
        }
        let timestamp = DateTime::<Utc>::from_timestamp(quote.t, 0)
            .ok_or_else(|| ProviderError::Parse(format!("invalid quote timestamp {}", quote.t)))?;

        Ok(SymbolPrice {
            symbol: symbol.clone(),
            open: quote.o,
            high: quote.h,
            low: quote.l,
            current: quote.c,
            previous_close: quote.pc,
            timestamp,
        })
    }

    async fn company_profile(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<CompanyProfile>, ProviderError> {
        let profile: ProfileResponse = self
            .rest
            .get("/stock/profile2", &[("symbol", symbol.as_str())])
            .await
            .map_err(|e| self.map_err(e))?;

        if profile.name.is_none() && profile.industry.is_none() {
            return Ok(None);
        }
        Ok(Some(CompanyProfile {
            name: profile.name,
            industry: profile.industry.filter(|i| !i.trim().is_empty()),
        }))
    }
}
