use crate::application::ports::{BrokerageRepository, RepositoryResult};
use crate::domain::{Brokerage, Country};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory brokerage repository keyed by exact name
pub struct InMemoryBrokerageRepository {
    brokerages: Arc<DashMap<String, Brokerage>>,
}

impl InMemoryBrokerageRepository {
    pub fn new() -> Self {
        Self {
            brokerages: Arc::new(DashMap::new()),
        }
    }

    /// Create pre-populated with the given venues
    pub fn with_brokerages(brokerages: impl IntoIterator<Item = Brokerage>) -> Self {
        let repo = Self::new();
        for brokerage in brokerages {
            repo.add(brokerage);
        }
        repo
    }

    /// Add a brokerage (sync)
    pub fn add(&self, brokerage: Brokerage) {
        self.brokerages.insert(brokerage.name.clone(), brokerage);
    }
}

impl Default for InMemoryBrokerageRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryBrokerageRepository {
    fn clone(&self) -> Self {
        Self {
            brokerages: Arc::clone(&self.brokerages),
        }
    }
}

#[async_trait]
impl BrokerageRepository for InMemoryBrokerageRepository {
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Brokerage>> {
        Ok(self.brokerages.get(name).map(|b| b.value().clone()))
    }

    async fn list(&self, country: Option<Country>) -> RepositoryResult<Vec<Brokerage>> {
        let mut brokerages: Vec<Brokerage> = self
            .brokerages
            .iter()
            .filter(|b| country.is_none_or(|c| b.country == c))
            .map(|b| b.value().clone())
            .collect();
        brokerages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(brokerages)
    }

    async fn save(&self, brokerage: Brokerage) -> RepositoryResult<()> {
        self.add(brokerage);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_exact_name() {
        let repo = InMemoryBrokerageRepository::with_brokerages([
            Brokerage::new("Clear", Country::Br),
            Brokerage::new("Avenue", Country::Us),
        ]);

        assert!(repo.find_by_name("Clear").await.unwrap().is_some());
        assert!(repo.find_by_name("clear").await.unwrap().is_none());

        let us = repo.list(Some(Country::Us)).await.unwrap();
        assert_eq!(us.len(), 1);
        assert_eq!(us[0].name, "Avenue");
        assert_eq!(repo.list(None).await.unwrap().len(), 2);
    }
}
