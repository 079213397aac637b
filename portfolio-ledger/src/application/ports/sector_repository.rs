use super::RepositoryResult;
use crate::domain::Sector;
use async_trait::async_trait;

/// Repository for sectors, keyed by name
#[async_trait]
pub trait SectorRepository: Send + Sync {
    /// Return the sector with this name, creating it on first use
    async fn create_or_get(&self, name: &str) -> RepositoryResult<Sector>;

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Sector>>;
}
