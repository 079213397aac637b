use super::RepositoryResult;
use crate::domain::{Brokerage, Country};
use async_trait::async_trait;

/// Repository for trading venues
#[async_trait]
pub trait BrokerageRepository: Send + Sync {
    /// Exact-name lookup
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Brokerage>>;

    async fn list(&self, country: Option<Country>) -> RepositoryResult<Vec<Brokerage>>;

    async fn save(&self, brokerage: Brokerage) -> RepositoryResult<()>;
}
