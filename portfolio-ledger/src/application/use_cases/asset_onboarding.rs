use crate::application::ports::{
    AssetRepository, AssetTypeRepository, MarketDataProvider, RepositoryError, SectorRepository,
};
use crate::domain::services::classification;
use crate::domain::{Asset, AssetKind, Country, Symbol, share_class};
use crate::error::{LedgerError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Materializes an asset the first time any user transacts in it.
///
/// Steps: external lookup, classification, sector, asset type, share class,
/// asset row. Sector and asset type are upserts and the asset row is written
/// last, so a failure part-way leaves nothing addressable and a retry
/// converges.
pub struct AssetOnboarding<A, T, S>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    S: SectorRepository,
{
    asset_repo: Arc<A>,
    asset_type_repo: Arc<T>,
    sector_repo: Arc<S>,
    market_data: Arc<dyn MarketDataProvider>,
}

impl<A, T, S> AssetOnboarding<A, T, S>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    S: SectorRepository,
{
    pub fn new(
        asset_repo: Arc<A>,
        asset_type_repo: Arc<T>,
        sector_repo: Arc<S>,
        market_data: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            asset_repo,
            asset_type_repo,
            sector_repo,
            market_data,
        }
    }

    /// Return the asset for `symbol`, creating it from market data if needed
    pub async fn ensure_asset(&self, symbol: &Symbol, country: Country) -> Result<Asset> {
        if let Some(asset) = self.asset_repo.find_by_symbol(symbol).await? {
            debug!(symbol = %symbol, asset_id = %asset.id, "asset already onboarded");
            return Ok(asset);
        }

        let lookup = self
            .market_data
            .lookup_symbol(symbol, country)
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    LedgerError::UnknownSymbol(symbol.to_string())
                } else {
                    LedgerError::Upstream(err)
                }
            })?;

        let kind = classification::classify(country, &lookup.raw_type).ok_or_else(|| {
            LedgerError::UnsupportedAssetClass {
                symbol: symbol.to_string(),
                raw_type: lookup.raw_type.clone(),
            }
        })?;

        let industry = self.profile_industry(symbol, country, kind).await;
        let sector_name =
            classification::sector_name(kind, industry.as_deref(), lookup.sector.as_deref());
        let sector = self.sector_repo.create_or_get(&sector_name).await?;
        let asset_type = self.asset_type_repo.search_or_create(kind, country).await?;
        let preference = share_class(symbol, country, kind);

        let asset = Asset::new(symbol.clone(), lookup.name, preference, asset_type, sector);
        match self.asset_repo.create(asset).await {
            Ok(asset) => {
                info!(
                    symbol = %symbol,
                    asset_id = %asset.id,
                    kind = %kind,
                    sector = %asset.sector.name,
                    "asset onboarded"
                );
                Ok(asset)
            }
            Err(RepositoryError::Conflict(_)) => {
                // Another request onboarded the same symbol first
                debug!(symbol = %symbol, "asset created concurrently, re-reading");
                self.asset_repo
                    .find_by_symbol(symbol)
                    .await?
                    .ok_or_else(|| LedgerError::AssetNotFound(symbol.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Industry from the company profile, US stocks only. Best effort.
    async fn profile_industry(
        &self,
        symbol: &Symbol,
        country: Country,
        kind: AssetKind,
    ) -> Option<String> {
        if country != Country::Us || kind != AssetKind::Stock {
            return None;
        }
        match self.market_data.company_profile(symbol).await {
            Ok(profile) => profile.and_then(|p| p.industry),
            Err(err) => {
                warn!(symbol = %symbol, error = %err, "company profile unavailable, using lookup sector");
                None
            }
        }
    }
}
