use crate::application::ports::{EarningRepository, RepositoryResult};
use crate::domain::{AssetId, Earning, EarningId};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory earning repository
pub struct InMemoryEarningRepository {
    earnings: Arc<DashMap<EarningId, Earning>>,
}

impl InMemoryEarningRepository {
    pub fn new() -> Self {
        Self {
            earnings: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.earnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.earnings.is_empty()
    }
}

impl Default for InMemoryEarningRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryEarningRepository {
    fn clone(&self) -> Self {
        Self {
            earnings: Arc::clone(&self.earnings),
        }
    }
}

#[async_trait]
impl EarningRepository for InMemoryEarningRepository {
    async fn create(&self, earning: Earning) -> RepositoryResult<Earning> {
        self.earnings.insert(earning.id, earning.clone());
        Ok(earning)
    }

    async fn update(&self, earning: Earning) -> RepositoryResult<Option<Earning>> {
        match self.earnings.get_mut(&earning.id) {
            Some(mut stored) if stored.user_id == earning.user_id => {
                *stored = earning.clone();
                Ok(Some(earning))
            }
            _ => Ok(None),
        }
    }

    async fn find(&self, id: EarningId, user_id: &str) -> RepositoryResult<Option<Earning>> {
        Ok(self
            .earnings
            .get(&id)
            .filter(|e| e.user_id == user_id)
            .map(|e| e.value().clone()))
    }

    async fn delete(&self, id: EarningId, user_id: &str) -> RepositoryResult<bool> {
        Ok(self
            .earnings
            .remove_if(&id, |_, e| e.user_id == user_id)
            .is_some())
    }

    async fn delete_for_asset(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<usize> {
        let mut removed = 0;
        self.earnings.retain(|_, e| {
            let owned = e.asset_id == asset_id && e.user_id == user_id;
            if owned {
                removed += 1;
            }
            !owned
        });
        Ok(removed)
    }

    async fn search(&self, asset_id: AssetId, user_id: &str) -> RepositoryResult<Vec<Earning>> {
        let mut earnings: Vec<Earning> = self
            .earnings
            .iter()
            .filter(|e| e.asset_id == asset_id && e.user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        earnings.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(earnings)
    }
}
