use super::order_service::parse_symbol;
use crate::application::ports::{
    AssetRepository, AssetTypeRepository, AssetUserRelationRepository, BrokerageRepository,
    EarningRepository, OrderRepository, RepositoryError, SectorRepository,
};
use crate::application::use_cases::OrderService;
use crate::domain::{BrokerageHolding, EventKind, Order, OrderRules, ValidationError};
use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct ApplyEventCommand {
    pub symbol: String,
    pub event_type: String,
    /// Old shares per new share for splits and bonuses. Ignored for demergers.
    pub rate: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub date: NaiveDate,
}

/// Quantity and unit price of the order an event books at one brokerage
pub fn event_order_terms(
    event: EventKind,
    held: Decimal,
    rate: Decimal,
    price: Decimal,
) -> std::result::Result<(Decimal, Decimal), ValidationError> {
    match event {
        EventKind::Split | EventKind::Bonus => {
            let quantity = held
                .checked_div(rate)
                .ok_or(ValidationError::InvalidEventRate)?;
            Ok((quantity, price))
        }
        // Cash-equivalent booking: share count unchanged, price scaled by holding
        EventKind::Demerger => {
            let price = price
                .checked_mul(held)
                .ok_or(ValidationError::AmountOverflow)?;
            Ok((held, price))
        }
    }
}

/// Applies splits, bonuses and demergers to every brokerage holding the asset
pub struct CorporateEventProcessor<A, T, S, B, R, O, E>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    S: SectorRepository,
    B: BrokerageRepository,
    R: AssetUserRelationRepository,
    O: OrderRepository,
    E: EarningRepository,
{
    order_service: Arc<OrderService<A, T, S, B, R, O, E>>,
    asset_repo: Arc<A>,
    relation_repo: Arc<R>,
    order_repo: Arc<O>,
}

impl<A, T, S, B, R, O, E> CorporateEventProcessor<A, T, S, B, R, O, E>
where
    A: AssetRepository + 'static,
    T: AssetTypeRepository + 'static,
    S: SectorRepository + 'static,
    B: BrokerageRepository + 'static,
    R: AssetUserRelationRepository + 'static,
    O: OrderRepository + 'static,
    E: EarningRepository + 'static,
{
    pub fn new(
        order_service: Arc<OrderService<A, T, S, B, R, O, E>>,
        asset_repo: Arc<A>,
        relation_repo: Arc<R>,
        order_repo: Arc<O>,
    ) -> Self {
        Self {
            order_service,
            asset_repo,
            relation_repo,
            order_repo,
        }
    }

    /// Book one event order per brokerage holding the asset on `date`.
    ///
    /// Orders are placed concurrently. If any placement fails, the orders
    /// this call already created are deleted again and the first failure is
    /// returned. Only brokerages with a positive net holding get an order.
    pub async fn apply_event(&self, user_id: &str, command: ApplyEventCommand) -> Result<Vec<Order>> {
        let event = OrderRules::event_type_value_verification(&command.event_type)?;
        if event != EventKind::Demerger && command.rate <= Decimal::ZERO {
            return Err(ValidationError::InvalidEventRate.into());
        }
        let symbol = parse_symbol(&command.symbol)?;

        let asset = self
            .asset_repo
            .find_by_symbol(&symbol)
            .await?
            .ok_or_else(|| LedgerError::RelationNotFound(symbol.to_string()))?;
        if self.relation_repo.find(asset.id, user_id).await?.is_none() {
            return Err(LedgerError::RelationNotFound(symbol.to_string()));
        }
        OrderRules::validate_event_order(asset.country(), command.price, &command.currency)?;

        let holdings: Vec<BrokerageHolding> = self
            .order_repo
            .quantity_by_brokerage(asset.id, user_id, command.date)
            .await?
            .into_iter()
            .filter(|h| {
                if h.quantity.is_sign_negative() && !h.quantity.is_zero() {
                    warn!(
                        user_id = %user_id,
                        symbol = %symbol,
                        brokerage = %h.brokerage.name,
                        quantity = %h.quantity,
                        "short holding skipped"
                    );
                }
                h.quantity > Decimal::ZERO
            })
            .collect();
        if holdings.is_empty() {
            info!(user_id = %user_id, symbol = %symbol, event = %event, "no holdings on event date");
            return Ok(Vec::new());
        }

        // All terms are computed before anything is written
        let terms = holdings
            .into_iter()
            .map(|holding| {
                event_order_terms(event, holding.quantity, command.rate, command.price)
                    .map(|(quantity, price)| (holding, quantity, price))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let asset = Arc::new(asset);
        let mut tasks = JoinSet::new();
        for (index, (holding, quantity, price)) in terms.into_iter().enumerate() {
            let service = Arc::clone(&self.order_service);
            let asset = Arc::clone(&asset);
            let user_id = user_id.to_string();
            let currency = command.currency.clone();
            let date = command.date;
            tasks.spawn(async move {
                let result = service
                    .place_event_order(
                        &user_id,
                        &asset,
                        holding.brokerage,
                        event,
                        quantity,
                        price,
                        &currency,
                        date,
                    )
                    .await;
                (index, result)
            });
        }

        let mut placed: Vec<Option<Order>> = vec![None; tasks.len()];
        let mut first_error: Option<LedgerError> = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(order))) => placed[index] = Some(order),
                Ok((index, Err(err))) => {
                    warn!(user_id = %user_id, symbol = %symbol, index, error = %err, "event order failed");
                    first_error.get_or_insert(err);
                }
                Err(join_err) => {
                    first_error.get_or_insert(LedgerError::Repository(RepositoryError::Storage(
                        format!("event order task failed: {join_err}"),
                    )));
                }
            }
        }

        let orders: Vec<Order> = placed.into_iter().flatten().collect();
        if let Some(err) = first_error {
            self.compensate(user_id, &orders).await;
            return Err(err);
        }

        info!(
            user_id = %user_id,
            symbol = %symbol,
            event = %event,
            orders = orders.len(),
            "corporate event applied"
        );
        Ok(orders)
    }

    /// Delete orders created by a failed event, newest first
    async fn compensate(&self, user_id: &str, created: &[Order]) {
        for order in created.iter().rev() {
            match self.order_repo.delete(order.id, user_id).await {
                Ok(true) => {
                    warn!(user_id = %user_id, order_id = %order.id, "event order rolled back");
                }
                Ok(false) => {
                    error!(user_id = %user_id, order_id = %order.id, "event order vanished before rollback");
                }
                Err(err) => {
                    error!(user_id = %user_id, order_id = %order.id, error = %err, "event order rollback failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_divides_holding_by_rate() {
        assert_eq!(
            event_order_terms(EventKind::Split, dec!(100), dec!(0.5), dec!(0)),
            Ok((dec!(200), dec!(0)))
        );
        assert_eq!(
            event_order_terms(EventKind::Bonus, dec!(100), dec!(10), dec!(0)),
            Ok((dec!(10), dec!(0)))
        );
    }

    #[test]
    fn test_demerger_scales_price() {
        assert_eq!(
            event_order_terms(EventKind::Demerger, dec!(30), dec!(1), dec!(1.5)),
            Ok((dec!(30), dec!(45.0)))
        );
    }

    #[test]
    fn test_demerger_price_out_of_range() {
        assert_eq!(
            event_order_terms(
                EventKind::Demerger,
                dec!(1_000_000_000_000_000),
                dec!(1),
                dec!(1_000_000_000_000_000)
            ),
            Err(ValidationError::AmountOverflow)
        );
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        assert_eq!(
            event_order_terms(EventKind::Split, dec!(30), dec!(0), dec!(0)),
            Err(ValidationError::InvalidEventRate)
        );
    }
}
