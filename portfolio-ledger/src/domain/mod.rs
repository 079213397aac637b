pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{
    Asset, AssetType, AssetUserRelation, Brokerage, BrokerageHolding, CompanyProfile, Earning,
    Order, Sector, SymbolLookup, SymbolPrice,
};

pub use services::{OrderRules, PositionResume, ValidatedOrder, ValidationError, share_class};

pub use value_objects::{
    AssetId, AssetKind, AssetTypeId, BrokerageId, Country, EarningId, EarningKind, EventKind,
    OrderId, OrderKind, SectorId, ShareClass, Symbol, UserId,
};
