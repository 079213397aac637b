//! Portfolio Ledger
//!
//! Transaction orchestration for a personal investment tracker: orders,
//! earnings and corporate events recorded against assets that are onboarded
//! on demand from external market-data providers.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture with clear separation of concerns:
//!
//! - **Domain**: Entities, value objects and pure rules (OrderRules, classification, resume)
//! - **Application**: Use cases and port interfaces (OrderService, CorporateEventProcessor, etc.)
//! - **Infrastructure**: Implementations of ports (in-memory repositories, market-data adapters)
//!
//! # Example
//!
//! ```ignore
//! use portfolio_ledger::{CreateOrderCommand, Ledger, LedgerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let ledger = Ledger::from_config(LedgerConfig::from_file("ledger.json")?)?;
//!     let order = ledger.orders.create_order("user-1", command).await?;
//! }
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-export commonly used types
pub use domain::{
    Asset, AssetKind, AssetType, Brokerage, Country, Earning, EarningKind, EventKind, Order,
    OrderKind, OrderRules, PositionResume, Sector, ShareClass, Symbol, SymbolLookup, SymbolPrice,
    ValidationError,
};

pub use application::{
    ApplyEventCommand, AssetView, AssetViewQuery, CreateEarningCommand, CreateOrderCommand,
    OrderSearchParams, PriceAggregator, RemovedPosition, UpdateEarningCommand, UpdateOrderCommand,
};

// Re-export port traits for integration tests
pub use application::ports::{
    AssetRepository, AssetUserRelationRepository, BrokerageRepository, EarningRepository,
    MarketDataProvider, OrderRepository, ProviderError, RepositoryError,
};

pub use error::{LedgerError, StatusHint};

pub use infrastructure::{
    ConfigError, InMemoryAssetRepository, InMemoryAssetTypeRepository,
    InMemoryAssetUserRelationRepository, InMemoryBrokerageRepository, InMemoryEarningRepository,
    InMemoryOrderRepository, InMemorySectorRepository, LedgerConfig, MarketDataRouter,
    StaticListing, StaticMarketData,
};

use application::use_cases::{
    AssetOnboarding, CorporateEventProcessor, EarningService, OrderService, PortfolioView,
};
use std::sync::Arc;
use std::time::Duration;

pub type LedgerOnboarding =
    AssetOnboarding<InMemoryAssetRepository, InMemoryAssetTypeRepository, InMemorySectorRepository>;

pub type LedgerOrderService = OrderService<
    InMemoryAssetRepository,
    InMemoryAssetTypeRepository,
    InMemorySectorRepository,
    InMemoryBrokerageRepository,
    InMemoryAssetUserRelationRepository,
    InMemoryOrderRepository,
    InMemoryEarningRepository,
>;

pub type LedgerEarningService = EarningService<
    InMemoryAssetRepository,
    InMemoryAssetTypeRepository,
    InMemorySectorRepository,
    InMemoryAssetUserRelationRepository,
    InMemoryEarningRepository,
>;

pub type LedgerEventProcessor = CorporateEventProcessor<
    InMemoryAssetRepository,
    InMemoryAssetTypeRepository,
    InMemorySectorRepository,
    InMemoryBrokerageRepository,
    InMemoryAssetUserRelationRepository,
    InMemoryOrderRepository,
    InMemoryEarningRepository,
>;

pub type LedgerPortfolioView = PortfolioView<
    InMemoryAssetRepository,
    InMemoryAssetTypeRepository,
    InMemorySectorRepository,
    InMemoryAssetUserRelationRepository,
    InMemoryOrderRepository,
    InMemoryEarningRepository,
>;

/// The ledger with every use case wired to in-memory storage
pub struct Ledger {
    pub config: LedgerConfig,
    pub asset_repo: Arc<InMemoryAssetRepository>,
    pub asset_type_repo: Arc<InMemoryAssetTypeRepository>,
    pub sector_repo: Arc<InMemorySectorRepository>,
    pub brokerage_repo: Arc<InMemoryBrokerageRepository>,
    pub relation_repo: Arc<InMemoryAssetUserRelationRepository>,
    pub order_repo: Arc<InMemoryOrderRepository>,
    pub earning_repo: Arc<InMemoryEarningRepository>,
    pub market_data: Arc<dyn MarketDataProvider>,
    pub onboarding: Arc<LedgerOnboarding>,
    pub prices: Arc<PriceAggregator>,
    pub orders: Arc<LedgerOrderService>,
    pub earnings: Arc<LedgerEarningService>,
    pub events: Arc<LedgerEventProcessor>,
    pub portfolio: Arc<LedgerPortfolioView>,
}

impl Ledger {
    /// Build the configured providers and wire the ledger
    pub fn from_config(config: LedgerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let router = MarketDataRouter::from_config(&config.market_data)?;
        Ok(Self::with_market_data(config, Arc::new(router)))
    }

    /// Wire the ledger around an already-built provider
    pub fn with_market_data(config: LedgerConfig, market_data: Arc<dyn MarketDataProvider>) -> Self {
        let asset_repo = Arc::new(InMemoryAssetRepository::new());
        let asset_type_repo = Arc::new(InMemoryAssetTypeRepository::new());
        let sector_repo = Arc::new(InMemorySectorRepository::new());
        let brokerage_repo = Arc::new(InMemoryBrokerageRepository::with_brokerages(
            config
                .brokerages
                .iter()
                .map(|b| Brokerage::new(b.name.as_str(), b.country)),
        ));
        let relation_repo = Arc::new(InMemoryAssetUserRelationRepository::new());
        let order_repo = Arc::new(InMemoryOrderRepository::new());
        let earning_repo = Arc::new(InMemoryEarningRepository::new());

        let onboarding = Arc::new(AssetOnboarding::new(
            Arc::clone(&asset_repo),
            Arc::clone(&asset_type_repo),
            Arc::clone(&sector_repo),
            Arc::clone(&market_data),
        ));
        let prices = Arc::new(PriceAggregator::new(
            Arc::clone(&market_data),
            Duration::from_millis(config.market_data.price_deadline_ms),
            config.market_data.max_in_flight,
        ));
        let orders = Arc::new(OrderService::new(
            Arc::clone(&onboarding),
            Arc::clone(&asset_repo),
            Arc::clone(&brokerage_repo),
            Arc::clone(&relation_repo),
            Arc::clone(&order_repo),
            Arc::clone(&earning_repo),
        ));
        let earnings = Arc::new(EarningService::new(
            Arc::clone(&onboarding),
            Arc::clone(&asset_repo),
            Arc::clone(&relation_repo),
            Arc::clone(&earning_repo),
        ));
        let events = Arc::new(CorporateEventProcessor::new(
            Arc::clone(&orders),
            Arc::clone(&asset_repo),
            Arc::clone(&relation_repo),
            Arc::clone(&order_repo),
        ));
        let portfolio = Arc::new(PortfolioView::new(
            Arc::clone(&onboarding),
            Arc::clone(&prices),
            Arc::clone(&asset_repo),
            Arc::clone(&relation_repo),
            Arc::clone(&order_repo),
            Arc::clone(&earning_repo),
        ));

        tracing::info!(
            name = %config.name,
            brokerages = config.brokerages.len(),
            "Ledger initialized"
        );

        Ledger {
            config,
            asset_repo,
            asset_type_repo,
            sector_repo,
            brokerage_repo,
            relation_repo,
            order_repo,
            earning_repo,
            market_data,
            onboarding,
            prices,
            orders,
            earnings,
            events,
            portfolio,
        }
    }
}
