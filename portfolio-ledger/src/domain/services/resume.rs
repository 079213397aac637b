//! Position totals derived from a user's order and earning history.

use crate::domain::entities::{Earning, Order};
use crate::domain::services::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionResume {
    /// Net signed quantity across every order
    pub total_quantity: Decimal,
    /// Cost per share over acquisitions only (positive quantities)
    pub weighted_average_price: Decimal,
    /// Net amount invested per share still held, sales included
    pub weighted_adjusted_price: Decimal,
    pub total_earnings: Decimal,
}

impl PositionResume {
    /// Totals over a history. Fails only when a sum leaves the decimal range.
    pub fn from_history(
        orders: &[Order],
        earnings: &[Earning],
    ) -> Result<Self, ValidationError> {
        let mut total_quantity = Decimal::ZERO;
        let mut net_notional = Decimal::ZERO;
        let mut acquired_quantity = Decimal::ZERO;
        let mut acquired_notional = Decimal::ZERO;

        for order in orders {
            let notional = order.notional().ok_or(ValidationError::AmountOverflow)?;
            total_quantity = add(total_quantity, order.quantity)?;
            net_notional = add(net_notional, notional)?;
            if order.quantity > Decimal::ZERO {
                acquired_quantity = add(acquired_quantity, order.quantity)?;
                acquired_notional = add(acquired_notional, notional)?;
            }
        }

        let total_earnings = earnings
            .iter()
            .try_fold(Decimal::ZERO, |sum, e| add(sum, e.amount))?;

        Ok(PositionResume {
            total_quantity,
            weighted_average_price: ratio(acquired_notional, acquired_quantity),
            weighted_adjusted_price: ratio(net_notional, total_quantity),
            total_earnings,
        })
    }
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, ValidationError> {
    a.checked_add(b).ok_or(ValidationError::AmountOverflow)
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator
        .checked_div(denominator)
        .unwrap_or(Decimal::ZERO)
        .normalize()
}
