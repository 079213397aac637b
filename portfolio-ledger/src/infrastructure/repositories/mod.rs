mod in_memory_asset;
mod in_memory_asset_type;
mod in_memory_brokerage;
mod in_memory_earning;
mod in_memory_order;
mod in_memory_relation;
mod in_memory_sector;

pub use in_memory_asset::InMemoryAssetRepository;
pub use in_memory_asset_type::InMemoryAssetTypeRepository;
pub use in_memory_brokerage::InMemoryBrokerageRepository;
pub use in_memory_earning::InMemoryEarningRepository;
pub use in_memory_order::InMemoryOrderRepository;
pub use in_memory_relation::InMemoryAssetUserRelationRepository;
pub use in_memory_sector::InMemorySectorRepository;
