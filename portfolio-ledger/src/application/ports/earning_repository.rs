use super::RepositoryResult;
use crate::domain::{AssetId, Earning, EarningId};
use async_trait::async_trait;

/// Repository for earnings
#[async_trait]
pub trait EarningRepository: Send + Sync {
    async fn create(&self, earning: Earning) -> RepositoryResult<Earning>;

    /// Returns `None` when (id, user) does not resolve
    async fn update(&self, earning: Earning) -> RepositoryResult<Option<Earning>>;

    async fn find(&self, id: EarningId, user_id: &str) -> RepositoryResult<Option<Earning>>;

    async fn delete(&self, id: EarningId, user_id: &str) -> RepositoryResult<bool>;

    async fn delete_for_asset(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<usize>;

    /// Earnings of a user in an asset, oldest first
    async fn search(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<Vec<Earning>>;
}
