use super::RepositoryResult;
use crate::domain::{AssetId, AssetUserRelation};
use async_trait::async_trait;

/// Repository for user-asset links
#[async_trait]
pub trait AssetUserRelationRepository: Send + Sync {
    /// Idempotent upsert. Returns `true` when the link was created by this call.
    async fn ensure(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<bool>;

    async fn find(
        &self,
        asset_id: AssetId,
        user_id: &str,
    ) -> RepositoryResult<Option<AssetUserRelation>>;

    async fn list_for_user(&self, user_id: &str) -> RepositoryResult<Vec<AssetUserRelation>>;

    /// Returns `false` when no such link existed
    async fn delete(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<bool>;
}
