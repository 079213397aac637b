use crate::application::ports::{
    AssetRepository, AssetTypeRepository, AssetUserRelationRepository, BrokerageRepository,
    EarningRepository, OrderQuery, OrderRepository, Page, SectorRepository, SortDirection,
};
use crate::application::use_cases::AssetOnboarding;
use crate::domain::{
    Asset, Brokerage, Country, EventKind, Order, OrderId, OrderRules, Symbol, ValidationError,
};
use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub symbol: String,
    pub country: String,
    pub order_type: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub brokerage: String,
    pub date: NaiveDate,
}

/// Replacement values for an existing order. The market is the order's own.
#[derive(Debug, Clone)]
pub struct UpdateOrderCommand {
    pub order_type: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub brokerage: String,
    pub date: NaiveDate,
}

/// Raw pagination and ordering parameters as received from a request
#[derive(Debug, Clone, Default)]
pub struct OrderSearchParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub order_by: Option<String>,
}

impl OrderSearchParams {
    /// Parse into a repository query.
    ///
    /// `limit` and `offset` go together: if either is present both must be
    /// non-negative integers. `order_by` is `asc` or `desc`.
    pub fn parse(&self) -> std::result::Result<OrderQuery, ValidationError> {
        let page = match (self.limit.as_deref(), self.offset.as_deref()) {
            (None, None) => None,
            (limit, offset) => Some(Page {
                limit: parse_non_negative("limit", limit)?,
                offset: parse_non_negative("offset", offset)?,
            }),
        };

        let direction = match self.order_by.as_deref().map(str::trim) {
            None => SortDirection::Asc,
            Some(value) if value.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(value) if value.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(value) => return Err(ValidationError::InvalidOrderBy(value.to_string())),
        };

        Ok(OrderQuery { page, direction })
    }
}

fn parse_non_negative(
    field: &str,
    value: Option<&str>,
) -> std::result::Result<usize, ValidationError> {
    let value = value.ok_or_else(|| {
        ValidationError::InvalidPagination(format!("{field} is required with pagination"))
    })?;
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ValidationError::InvalidPagination(format!("{field}={value}")))
}

/// What `remove_asset_from_user` deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedPosition {
    pub orders: usize,
    pub earnings: usize,
}

/// Link a user to an asset, tolerating an existing link
pub(crate) async fn ensure_relation<R: AssetUserRelationRepository>(
    relation_repo: &R,
    asset: &Asset,
    user_id: &str,
) -> Result<()> {
    if relation_repo.ensure(asset.id, user_id).await? {
        info!(user_id = %user_id, symbol = %asset.symbol, "asset added to portfolio");
    } else {
        debug!(user_id = %user_id, symbol = %asset.symbol, "relation already exists");
    }
    Ok(())
}

pub(crate) fn parse_symbol(symbol: &str) -> std::result::Result<Symbol, ValidationError> {
    Symbol::new(symbol).map_err(|e| ValidationError::InvalidSymbol(format!("{symbol}: {e}")))
}

/// Creates, updates, deletes and searches a user's orders
pub struct OrderService<A, T, S, B, R, O, E>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    S: SectorRepository,
    B: BrokerageRepository,
    R: AssetUserRelationRepository,
    O: OrderRepository,
    E: EarningRepository,
{
    onboarding: Arc<AssetOnboarding<A, T, S>>,
    asset_repo: Arc<A>,
    brokerage_repo: Arc<B>,
    relation_repo: Arc<R>,
    order_repo: Arc<O>,
    earning_repo: Arc<E>,
}

impl<A, T, S, B, R, O, E> OrderService<A, T, S, B, R, O, E>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    S: SectorRepository,
    B: BrokerageRepository,
    R: AssetUserRelationRepository,
    O: OrderRepository,
    E: EarningRepository,
{
    pub fn new(
        onboarding: Arc<AssetOnboarding<A, T, S>>,
        asset_repo: Arc<A>,
        brokerage_repo: Arc<B>,
        relation_repo: Arc<R>,
        order_repo: Arc<O>,
        earning_repo: Arc<E>,
    ) -> Self {
        Self {
            onboarding,
            asset_repo,
            brokerage_repo,
            relation_repo,
            order_repo,
            earning_repo,
        }
    }

    /// Record a buy or sell, onboarding the asset on first use.
    ///
    /// Nothing is written when the order breaks a market rule.
    pub async fn create_order(&self, user_id: &str, command: CreateOrderCommand) -> Result<Order> {
        let validated = OrderRules::validate(
            &command.order_type,
            &command.country,
            command.quantity,
            command.price,
            &command.currency,
        )?;
        let symbol = parse_symbol(&command.symbol)?;

        let asset = self.onboarding.ensure_asset(&symbol, validated.country).await?;
        OrderRules::same_market(asset.symbol.as_str(), asset.country(), validated.country)?;
        ensure_relation(self.relation_repo.as_ref(), &asset, user_id).await?;
        let brokerage = self.resolve_brokerage(&command.brokerage).await?;

        let order = Order::new(
            user_id,
            asset.id,
            brokerage,
            validated.kind,
            command.quantity,
            command.price,
            command.currency.trim().to_uppercase(),
            command.date,
        );
        let order = self.order_repo.create(order).await?;
        info!(
            user_id = %user_id,
            symbol = %symbol,
            order_id = %order.id,
            kind = %order.kind,
            quantity = %order.quantity,
            "order created"
        );
        Ok(order)
    }

    /// Book an order generated by a corporate event at an already-resolved brokerage
    #[allow(clippy::too_many_arguments)]
    pub async fn place_event_order(
        &self,
        user_id: &str,
        asset: &Asset,
        brokerage: Brokerage,
        event: EventKind,
        quantity: Decimal,
        price: Decimal,
        currency: &str,
        date: NaiveDate,
    ) -> Result<Order> {
        OrderRules::validate_event_order(asset.country(), price, currency)?;
        let order = Order::new(
            user_id,
            asset.id,
            brokerage,
            event.order_kind(),
            quantity,
            price,
            currency.trim().to_uppercase(),
            date,
        );
        Ok(self.order_repo.create(order).await?)
    }

    /// Replace an order's type, quantity, price, currency, brokerage and date
    pub async fn update_order(
        &self,
        user_id: &str,
        order_id: OrderId,
        command: UpdateOrderCommand,
    ) -> Result<Order> {
        let existing = self
            .order_repo
            .find(order_id, user_id)
            .await?
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        let asset = self
            .asset_repo
            .find_by_id(existing.asset_id)
            .await?
            .ok_or_else(|| LedgerError::AssetNotFound(existing.asset_id.to_string()))?;

        let validated = OrderRules::validate(
            &command.order_type,
            asset.country().code(),
            command.quantity,
            command.price,
            &command.currency,
        )?;
        let brokerage = self.resolve_brokerage(&command.brokerage).await?;

        let updated = Order {
            kind: validated.kind,
            quantity: command.quantity,
            price: command.price,
            currency: command.currency.trim().to_uppercase(),
            brokerage,
            date: command.date,
            ..existing
        };
        let updated = self
            .order_repo
            .update(updated)
            .await?
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        info!(user_id = %user_id, order_id = %order_id, "order updated");
        Ok(updated)
    }

    pub async fn delete_order(&self, user_id: &str, order_id: OrderId) -> Result<()> {
        if !self.order_repo.delete(order_id, user_id).await? {
            return Err(LedgerError::OrderNotFound(order_id));
        }
        info!(user_id = %user_id, order_id = %order_id, "order deleted");
        Ok(())
    }

    /// A user's orders in one asset, sorted by date
    pub async fn search_orders(
        &self,
        user_id: &str,
        symbol: &str,
        params: &OrderSearchParams,
    ) -> Result<Vec<Order>> {
        let query = params.parse()?;
        let asset = self.find_asset(symbol).await?;
        Ok(self.order_repo.search(asset.id, user_id, query).await?)
    }

    /// Drop an asset from a user's portfolio with its orders and earnings
    pub async fn remove_asset_from_user(
        &self,
        user_id: &str,
        symbol: &str,
    ) -> Result<RemovedPosition> {
        let asset = self.find_asset(symbol).await?;
        if self.relation_repo.find(asset.id, user_id).await?.is_none() {
            return Err(LedgerError::RelationNotFound(asset.symbol.to_string()));
        }

        let orders = self.order_repo.delete_for_asset(asset.id, user_id).await?;
        let earnings = self.earning_repo.delete_for_asset(asset.id, user_id).await?;
        self.relation_repo.delete(asset.id, user_id).await?;

        info!(
            user_id = %user_id,
            symbol = %asset.symbol,
            orders,
            earnings,
            "asset removed from portfolio"
        );
        Ok(RemovedPosition { orders, earnings })
    }

    async fn find_asset(&self, symbol: &str) -> Result<Asset> {
        let symbol = parse_symbol(symbol)?;
        self.asset_repo
            .find_by_symbol(&symbol)
            .await?
            .ok_or_else(|| LedgerError::AssetNotFound(symbol.to_string()))
    }

    async fn resolve_brokerage(&self, name: &str) -> Result<Brokerage> {
        self.brokerage_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| LedgerError::UnknownBrokerage(name.to_string()))
    }

    /// Brokerages a user can pick for a market
    pub async fn brokerages(&self, country: Option<Country>) -> Result<Vec<Brokerage>> {
        Ok(self.brokerage_repo.list(country).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<&str>, offset: Option<&str>, order_by: Option<&str>) -> OrderSearchParams {
        OrderSearchParams {
            limit: limit.map(String::from),
            offset: offset.map(String::from),
            order_by: order_by.map(String::from),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let query = OrderSearchParams::default().parse().unwrap();
        assert_eq!(query, OrderQuery::default());
    }

    #[test]
    fn test_parse_page_and_direction() {
        let query = params(Some("10"), Some("20"), Some("DESC")).parse().unwrap();
        assert_eq!(
            query.page,
            Some(Page {
                limit: 10,
                offset: 20
            })
        );
        assert_eq!(query.direction, SortDirection::Desc);
    }

    #[test]
    fn test_parse_rejects_bad_pagination() {
        assert!(matches!(
            params(Some("-1"), Some("0"), None).parse(),
            Err(ValidationError::InvalidPagination(_))
        ));
        assert!(matches!(
            params(Some("10"), None, None).parse(),
            Err(ValidationError::InvalidPagination(_))
        ));
        assert!(matches!(
            params(None, Some("abc"), None).parse(),
            Err(ValidationError::InvalidPagination(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_order_by() {
        assert_eq!(
            params(None, None, Some("newest")).parse(),
            Err(ValidationError::InvalidOrderBy("newest".into()))
        );
    }
}
