use crate::application::ports::{RepositoryResult, SectorRepository};
use crate::domain::Sector;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory sector repository keyed by name
pub struct InMemorySectorRepository {
    sectors: Arc<DashMap<String, Sector>>,
}

impl InMemorySectorRepository {
    pub fn new() -> Self {
        Self {
            sectors: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

impl Default for InMemorySectorRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemorySectorRepository {
    fn clone(&self) -> Self {
        Self {
            sectors: Arc::clone(&self.sectors),
        }
    }
}

#[async_trait]
impl SectorRepository for InMemorySectorRepository {
    async fn create_or_get(&self, name: &str) -> RepositoryResult<Sector> {
        Ok(self
            .sectors
            .entry(name.to_string())
            .or_insert_with(|| Sector::new(name))
            .value()
            .clone())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Sector>> {
        Ok(self.sectors.get(name).map(|s| s.value().clone()))
    }
}
