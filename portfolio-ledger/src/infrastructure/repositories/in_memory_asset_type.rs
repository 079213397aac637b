use crate::application::ports::{AssetTypeRepository, RepositoryResult};
use crate::domain::{AssetKind, AssetType, Country};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory asset type repository, one row per (kind, country)
pub struct InMemoryAssetTypeRepository {
    types: Arc<DashMap<(AssetKind, Country), AssetType>>,
}

impl InMemoryAssetTypeRepository {
    pub fn new() -> Self {
        Self {
            types: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for InMemoryAssetTypeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryAssetTypeRepository {
    fn clone(&self) -> Self {
        Self {
            types: Arc::clone(&self.types),
        }
    }
}

#[async_trait]
impl AssetTypeRepository for InMemoryAssetTypeRepository {
    async fn search_or_create(
        &self,
        kind: AssetKind,
        country: Country,
    ) -> RepositoryResult<AssetType> {
        Ok(self
            .types
            .entry((kind, country))
            .or_insert_with(|| AssetType::new(kind, country))
            .value()
            .clone())
    }

    async fn find(&self, kind: AssetKind, country: Country) -> RepositoryResult<Option<AssetType>> {
        Ok(self.types.get(&(kind, country)).map(|t| t.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_or_create_is_idempotent() {
        let repo = InMemoryAssetTypeRepository::new();
        let first = repo
            .search_or_create(AssetKind::Reit, Country::Br)
            .await
            .unwrap();
        let second = repo
            .search_or_create(AssetKind::Reit, Country::Br)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.name, "Brazilian Real Estate Funds");
        assert_eq!(repo.len(), 1);
    }
}
