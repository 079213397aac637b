use crate::domain::entities::Brokerage;
use crate::domain::value_objects::{AssetId, OrderId, OrderKind, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A buy, sell or corporate-event booking
///
/// Quantity is signed: positive adds to the holding, negative removes from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub asset_id: AssetId,
    pub brokerage: Brokerage,
    pub kind: OrderKind,
    pub quantity: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: impl Into<UserId>,
        asset_id: AssetId,
        brokerage: Brokerage,
        kind: OrderKind,
        quantity: Decimal,
        price: Decimal,
        currency: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Order {
            id: OrderId::new_v4(),
            user_id: user_id.into(),
            asset_id,
            brokerage,
            kind,
            quantity,
            price,
            currency: currency.into(),
            date,
            created_at: Utc::now(),
        }
    }

    /// Quantity times unit price, signed like the quantity. `None` on overflow.
    pub fn notional(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.price)
    }
}
