use crate::domain::value_objects::{AssetId, EarningId, EarningKind, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cash distribution received for an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earning {
    pub id: EarningId,
    pub user_id: UserId,
    pub asset_id: AssetId,
    pub kind: EarningKind,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Earning {
    pub fn new(
        user_id: impl Into<UserId>,
        asset_id: AssetId,
        kind: EarningKind,
        amount: Decimal,
        currency: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Earning {
            id: EarningId::new_v4(),
            user_id: user_id.into(),
            asset_id,
            kind,
            amount,
            currency: currency.into(),
            date,
            created_at: Utc::now(),
        }
    }
}
