use crate::application::ports::{
    OrderQuery, OrderRepository, RepositoryError, RepositoryResult, SortDirection,
};
use crate::domain::{AssetId, BrokerageHolding, BrokerageId, Order, OrderId};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory order repository
///
/// Thread-safe storage for orders using DashMap.
pub struct InMemoryOrderRepository {
    orders: Arc<DashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn owned_by(&self, asset_id: AssetId, user_id: &str) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.asset_id == asset_id && o.user_id == user_id)
            .map(|o| o.value().clone())
            .collect()
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryOrderRepository {
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> RepositoryResult<Order> {
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update(&self, order: Order) -> RepositoryResult<Option<Order>> {
        match self.orders.get_mut(&order.id) {
            Some(mut stored) if stored.user_id == order.user_id => {
                *stored = order.clone();
                Ok(Some(order))
            }
            _ => Ok(None),
        }
    }

    async fn find(&self, id: OrderId, user_id: &str) -> RepositoryResult<Option<Order>> {
        Ok(self
            .orders
            .get(&id)
            .filter(|o| o.user_id == user_id)
            .map(|o| o.value().clone()))
    }

    async fn delete(&self, id: OrderId, user_id: &str) -> RepositoryResult<bool> {
        Ok(self
            .orders
            .remove_if(&id, |_, o| o.user_id == user_id)
            .is_some())
    }

    async fn delete_for_asset(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<usize> {
        let mut removed = 0;
        self.orders.retain(|_, o| {
            let owned = o.asset_id == asset_id && o.user_id == user_id;
            if owned {
                removed += 1;
            }
            !owned
        });
        Ok(removed)
    }

    async fn search(
        &self,
        asset_id: AssetId,
        user_id: &str,
        query: OrderQuery,
    ) -> RepositoryResult<Vec<Order>> {
        let mut orders = self.owned_by(asset_id, user_id);
        orders.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        if query.direction == SortDirection::Desc {
            orders.reverse();
        }
        if let Some(page) = query.page {
            orders = orders
                .into_iter()
                .skip(page.offset)
                .take(page.limit)
                .collect();
        }
        Ok(orders)
    }

    async fn quantity_by_brokerage(
        &self,
        asset_id: AssetId,
        user_id: &str,
        until: NaiveDate,
    ) -> RepositoryResult<Vec<BrokerageHolding>> {
        let mut holdings: BTreeMap<BrokerageId, BrokerageHolding> = BTreeMap::new();
        for order in self
            .owned_by(asset_id, user_id)
            .into_iter()
            .filter(|o| o.date <= until)
        {
            let holding = holdings
                .entry(order.brokerage.id)
                .or_insert_with(|| BrokerageHolding {
                    brokerage: order.brokerage.clone(),
                    quantity: Decimal::ZERO,
                });
            holding.quantity = holding
                .quantity
                .checked_add(order.quantity)
                .ok_or_else(|| {
                    RepositoryError::Storage(format!(
                        "holding at {} exceeds the decimal range",
                        holding.brokerage.name
                    ))
                })?;
        }

        let mut holdings: Vec<BrokerageHolding> = holdings.into_values().collect();
        holdings.sort_by(|a, b| a.brokerage.name.cmp(&b.brokerage.name));
        Ok(holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Page;
    use crate::domain::{Brokerage, Country, OrderKind};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, d).unwrap()
    }

    fn make_order(
        asset_id: AssetId,
        brokerage: &Brokerage,
        quantity: Decimal,
        date: NaiveDate,
    ) -> Order {
        let kind = if quantity < Decimal::ZERO {
            OrderKind::Sell
        } else {
            OrderKind::Buy
        };
        Order::new(
            "user-1",
            asset_id,
            brokerage.clone(),
            kind,
            quantity,
            dec!(10),
            "BRL",
            date,
        )
    }

    #[tokio::test]
    async fn test_quantity_by_brokerage_out_of_range() {
        let repo = InMemoryOrderRepository::new();
        let asset_id = Uuid::new_v4();
        let clear = Brokerage::new("Clear", Country::Br);

        for _ in 0..2 {
            repo.create(make_order(asset_id, &clear, Decimal::MAX, day(1)))
                .await
                .unwrap();
        }

        let result = repo.quantity_by_brokerage(asset_id, "user-1", day(2)).await;
        assert!(matches!(result, Err(RepositoryError::Storage(_))));
    }

    #[tokio::test]
    async fn test_quantity_by_brokerage_respects_date() {
        let repo = InMemoryOrderRepository::new();
        let asset_id = Uuid::new_v4();
        let clear = Brokerage::new("Clear", Country::Br);
        let rico = Brokerage::new("Rico", Country::Br);

        repo.create(make_order(asset_id, &clear, dec!(100), day(1)))
            .await
            .unwrap();
        repo.create(make_order(asset_id, &clear, dec!(-40), day(5)))
            .await
            .unwrap();
        repo.create(make_order(asset_id, &rico, dec!(10), day(10)))
            .await
            .unwrap();
        repo.create(make_order(asset_id, &rico, dec!(15), day(20)))
            .await
            .unwrap();

        let holdings = repo
            .quantity_by_brokerage(asset_id, "user-1", day(10))
            .await
            .unwrap();
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[0].brokerage.name, "Clear");
        assert_eq!(holdings[0].quantity, dec!(60));
        assert_eq!(holdings[1].brokerage.name, "Rico");
        assert_eq!(holdings[1].quantity, dec!(10));

        let other_user = repo
            .quantity_by_brokerage(asset_id, "user-2", day(30))
            .await
            .unwrap();
        assert!(other_user.is_empty());
    }

    #[tokio::test]
    async fn test_search_sorts_and_pages() {
        let repo = InMemoryOrderRepository::new();
        let asset_id = Uuid::new_v4();
        let clear = Brokerage::new("Clear", Country::Br);
        for d in [3, 1, 2] {
            repo.create(make_order(asset_id, &clear, Decimal::from(d), day(d)))
                .await
                .unwrap();
        }

        let desc = repo
            .search(
                asset_id,
                "user-1",
                OrderQuery {
                    page: Some(Page {
                        limit: 2,
                        offset: 0,
                    }),
                    direction: SortDirection::Desc,
                },
            )
            .await
            .unwrap();
        let dates: Vec<NaiveDate> = desc.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![day(3), day(2)]);

        let asc = repo
            .search(asset_id, "user-1", OrderQuery::default())
            .await
            .unwrap();
        assert_eq!(asc.first().map(|o| o.date), Some(day(1)));
    }

    #[tokio::test]
    async fn test_find_and_delete_are_scoped_to_user() {
        let repo = InMemoryOrderRepository::new();
        let clear = Brokerage::new("Clear", Country::Br);
        let order = repo
            .create(make_order(Uuid::new_v4(), &clear, dec!(1), day(1)))
            .await
            .unwrap();

        assert!(repo.find(order.id, "user-2").await.unwrap().is_none());
        assert!(!repo.delete(order.id, "user-2").await.unwrap());
        assert!(repo.delete(order.id, "user-1").await.unwrap());
        assert!(repo.is_empty());
    }
}
