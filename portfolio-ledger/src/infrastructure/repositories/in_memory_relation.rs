use crate::application::ports::{AssetUserRelationRepository, RepositoryResult};
use crate::domain::{AssetId, AssetUserRelation, UserId};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// In-memory user-asset link repository
pub struct InMemoryAssetUserRelationRepository {
    relations: Arc<DashMap<(AssetId, UserId), AssetUserRelation>>,
}

impl InMemoryAssetUserRelationRepository {
    pub fn new() -> Self {
        Self {
            relations: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl Default for InMemoryAssetUserRelationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryAssetUserRelationRepository {
    fn clone(&self) -> Self {
        Self {
            relations: Arc::clone(&self.relations),
        }
    }
}

#[async_trait]
impl AssetUserRelationRepository for InMemoryAssetUserRelationRepository {
    async fn ensure(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<bool> {
        match self.relations.entry((asset_id, user_id.to_string())) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(AssetUserRelation::new(asset_id, user_id));
                Ok(true)
            }
        }
    }

    async fn find(
        &self,
        asset_id: AssetId,
        user_id: &str,
    ) -> RepositoryResult<Option<AssetUserRelation>> {
        Ok(self
            .relations
            .get(&(asset_id, user_id.to_string()))
            .map(|r| r.value().clone()))
    }

    async fn list_for_user(&self, user_id: &str) -> RepositoryResult<Vec<AssetUserRelation>> {
        Ok(self
            .relations
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.value().clone())
            .collect())
    }

    async fn delete(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<bool> {
        Ok(self
            .relations
            .remove(&(asset_id, user_id.to_string()))
            .is_some())
    }
}
