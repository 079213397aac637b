pub mod config;
pub mod market_data;
pub mod repositories;

pub use config::{
    BrokerageConfig, ConfigError, LedgerConfig, MarketDataConfig, ProviderConfig, ProviderKind,
    StaticSymbolConfig,
};
pub use market_data::{
    BrapiClient, FinnhubClient, MarketDataRouter, StaticListing, StaticMarketData,
};
pub use repositories::{
    InMemoryAssetRepository, InMemoryAssetTypeRepository, InMemoryAssetUserRelationRepository,
    InMemoryBrokerageRepository, InMemoryEarningRepository, InMemoryOrderRepository,
    InMemorySectorRepository,
};
