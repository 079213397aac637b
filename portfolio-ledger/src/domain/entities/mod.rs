mod asset;
mod brokerage;
mod earning;
mod market_data;
mod order;
mod relation;

pub use asset::{Asset, AssetType, Sector};
pub use brokerage::{Brokerage, BrokerageHolding};
pub use earning::Earning;
pub use market_data::{CompanyProfile, SymbolLookup, SymbolPrice};
pub use order::Order;
pub use relation::AssetUserRelation;
