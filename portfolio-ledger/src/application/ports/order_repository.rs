use super::RepositoryResult;
use crate::domain::{AssetId, BrokerageHolding, Order, OrderId};
use async_trait::async_trait;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

/// Search options for a user's orders in one asset, sorted by date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderQuery {
    pub page: Option<Page>,
    pub direction: SortDirection,
}

/// Repository for orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: Order) -> RepositoryResult<Order>;

    /// Replace a stored order. Returns `None` when (id, user) does not resolve.
    async fn update(&self, order: Order) -> RepositoryResult<Option<Order>>;

    async fn find(&self, id: OrderId, user_id: &str) -> RepositoryResult<Option<Order>>;

    /// Returns `false` when (id, user) does not resolve
    async fn delete(&self, id: OrderId, user_id: &str) -> RepositoryResult<bool>;

    /// Delete every order a user holds in an asset, returning how many went
    async fn delete_for_asset(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<usize>;

    async fn search(
        &self,
        asset_id: AssetId,
        user_id: &str,
        query: OrderQuery,
    ) -> RepositoryResult<Vec<Order>>;

    /// Net signed quantity per brokerage over orders dated on or before `until`
    async fn quantity_by_brokerage(
        &self,
        asset_id: AssetId,
        user_id: &str,
        until: NaiveDate,
    ) -> RepositoryResult<Vec<BrokerageHolding>>;
}
