pub mod ports;
pub mod use_cases;

pub use use_cases::{
    ApplyEventCommand, AssetOnboarding, AssetView, AssetViewQuery, CorporateEventProcessor,
    CreateEarningCommand, CreateOrderCommand, EarningService, OrderSearchParams, OrderService,
    PortfolioView, PriceAggregator, RemovedPosition, UpdateEarningCommand, UpdateOrderCommand,
};
