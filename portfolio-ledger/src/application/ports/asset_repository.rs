use super::RepositoryResult;
use crate::domain::{Asset, AssetId, AssetKind, Country, Symbol};
use async_trait::async_trait;

/// Repository for globally shared assets
#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn find_by_symbol(&self, symbol: &Symbol) -> RepositoryResult<Option<Asset>>;

    async fn find_by_id(&self, id: AssetId) -> RepositoryResult<Option<Asset>>;

    /// Insert a new asset. Fails with `Conflict` when the symbol is taken.
    async fn create(&self, asset: Asset) -> RepositoryResult<Asset>;

    async fn list_by_asset_type(
        &self,
        kind: AssetKind,
        country: Country,
    ) -> RepositoryResult<Vec<Asset>>;
}
