mod brapi;
mod finnhub;
mod rest;
mod router;
mod static_provider;

pub use brapi::{BRAPI_BASE_URL, BrapiClient};
pub use finnhub::{FINNHUB_BASE_URL, FinnhubClient};
pub use rest::RestError;
pub use router::MarketDataRouter;
pub use static_provider::{StaticListing, StaticMarketData};
