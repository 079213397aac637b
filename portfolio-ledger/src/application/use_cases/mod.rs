mod asset_onboarding;
mod corporate_event;
mod earning_service;
mod order_service;
mod portfolio_view;
mod price_aggregator;

pub use asset_onboarding::AssetOnboarding;
pub use corporate_event::{ApplyEventCommand, CorporateEventProcessor, event_order_terms};
pub use earning_service::{CreateEarningCommand, EarningService, UpdateEarningCommand};
pub use order_service::{
    CreateOrderCommand, OrderSearchParams, OrderService, RemovedPosition, UpdateOrderCommand,
};
pub use portfolio_view::{AssetView, AssetViewQuery, PortfolioView};
pub use price_aggregator::PriceAggregator;
