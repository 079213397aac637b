mod asset_kind;
mod country;
mod order_kind;
mod symbol;

pub use asset_kind::{AssetKind, ShareClass};
pub use country::Country;
pub use order_kind::{EarningKind, EventKind, OrderKind};
pub use symbol::Symbol;

pub type AssetId = uuid::Uuid;
pub type AssetTypeId = uuid::Uuid;
pub type SectorId = uuid::Uuid;
pub type BrokerageId = uuid::Uuid;
pub type OrderId = uuid::Uuid;
pub type EarningId = uuid::Uuid;

/// Opaque user identity issued by the auth subsystem
pub type UserId = String;
