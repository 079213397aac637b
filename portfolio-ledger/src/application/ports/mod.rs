mod asset_repository;
mod asset_type_repository;
mod brokerage_repository;
mod earning_repository;
mod error;
mod market_data;
mod order_repository;
mod relation_repository;
mod sector_repository;

pub use asset_repository::AssetRepository;
pub use asset_type_repository::AssetTypeRepository;
pub use brokerage_repository::BrokerageRepository;
pub use earning_repository::EarningRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use market_data::{MarketDataProvider, ProviderError};
pub use order_repository::{OrderQuery, OrderRepository, Page, SortDirection};
pub use relation_repository::AssetUserRelationRepository;
pub use sector_repository::SectorRepository;
