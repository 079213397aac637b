use super::RepositoryResult;
use crate::domain::{AssetKind, AssetType, Country};
use async_trait::async_trait;

/// Repository for asset classifications, one row per (kind, country)
#[async_trait]
pub trait AssetTypeRepository: Send + Sync {
    /// Return the existing row for the pair or create it
    async fn search_or_create(&self, kind: AssetKind, country: Country)
    -> RepositoryResult<AssetType>;

    async fn find(&self, kind: AssetKind, country: Country) -> RepositoryResult<Option<AssetType>>;
}
