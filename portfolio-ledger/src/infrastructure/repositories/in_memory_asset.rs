use crate::application::ports::{AssetRepository, RepositoryError, RepositoryResult};
use crate::domain::{Asset, AssetId, AssetKind, Country, Symbol};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// In-memory asset repository
///
/// Thread-safe storage keyed by symbol, which enforces the global
/// uniqueness of tickers.
pub struct InMemoryAssetRepository {
    assets: Arc<DashMap<Symbol, Asset>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self {
            assets: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for InMemoryAssetRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryAssetRepository {
    fn clone(&self) -> Self {
        Self {
            assets: Arc::clone(&self.assets),
        }
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn find_by_symbol(&self, symbol: &Symbol) -> RepositoryResult<Option<Asset>> {
        Ok(self.assets.get(symbol).map(|a| a.value().clone()))
    }

    async fn find_by_id(&self, id: AssetId) -> RepositoryResult<Option<Asset>> {
        Ok(self
            .assets
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.value().clone()))
    }

    async fn create(&self, asset: Asset) -> RepositoryResult<Asset> {
        match self.assets.entry(asset.symbol.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "asset {} already exists",
                asset.symbol
            ))),
            Entry::Vacant(slot) => {
                slot.insert(asset.clone());
                Ok(asset)
            }
        }
    }

    async fn list_by_asset_type(
        &self,
        kind: AssetKind,
        country: Country,
    ) -> RepositoryResult<Vec<Asset>> {
        let mut assets: Vec<Asset> = self
            .assets
            .iter()
            .filter(|a| a.kind() == kind && a.country() == country)
            .map(|a| a.value().clone())
            .collect();
        assets.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetType, Sector};

    fn make_asset(symbol: &str, kind: AssetKind, country: Country) -> Asset {
        Asset::new(
            Symbol::new(symbol).unwrap(),
            symbol,
            None,
            AssetType::new(kind, country),
            Sector::new("Finance"),
        )
    }

    #[tokio::test]
    async fn test_duplicate_symbol_conflicts() {
        let repo = InMemoryAssetRepository::new();
        repo.create(make_asset("ITSA4", AssetKind::Stock, Country::Br))
            .await
            .unwrap();

        let result = repo
            .create(make_asset("itsa4", AssetKind::Stock, Country::Br))
            .await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_list_by_asset_type() {
        let repo = InMemoryAssetRepository::new();
        repo.create(make_asset("ITSA4", AssetKind::Stock, Country::Br))
            .await
            .unwrap();
        repo.create(make_asset("BBAS3", AssetKind::Stock, Country::Br))
            .await
            .unwrap();
        repo.create(make_asset("HGLG11", AssetKind::Reit, Country::Br))
            .await
            .unwrap();
        repo.create(make_asset("AAPL", AssetKind::Stock, Country::Us))
            .await
            .unwrap();

        let stocks = repo
            .list_by_asset_type(AssetKind::Stock, Country::Br)
            .await
            .unwrap();
        let symbols: Vec<&str> = stocks.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BBAS3", "ITSA4"]);
    }
}
