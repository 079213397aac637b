use crate::domain::value_objects::{BrokerageId, Country};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading venue, looked up by exact name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brokerage {
    pub id: BrokerageId,
    pub name: String,
    pub country: Country,
}

impl Brokerage {
    pub fn new(name: impl Into<String>, country: Country) -> Self {
        Brokerage {
            id: BrokerageId::new_v4(),
            name: name.into(),
            country,
        }
    }
}

/// Net signed quantity a user holds of one asset at one brokerage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerageHolding {
    pub brokerage: Brokerage,
    pub quantity: Decimal,
}
