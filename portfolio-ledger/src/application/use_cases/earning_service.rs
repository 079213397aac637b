use super::order_service::{ensure_relation, parse_symbol};
use crate::application::ports::{
    AssetRepository, AssetTypeRepository, AssetUserRelationRepository, EarningRepository,
    SectorRepository,
};
use crate::application::use_cases::AssetOnboarding;
use crate::domain::{Earning, EarningId, OrderRules};
use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CreateEarningCommand {
    pub symbol: String,
    pub country: String,
    pub earning_type: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct UpdateEarningCommand {
    pub earning_type: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
}

/// Dividends, interest on capital and other income received for an asset
pub struct EarningService<A, T, S, R, E>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    S: SectorRepository,
    R: AssetUserRelationRepository,
    E: EarningRepository,
{
    onboarding: Arc<AssetOnboarding<A, T, S>>,
    asset_repo: Arc<A>,
    relation_repo: Arc<R>,
    earning_repo: Arc<E>,
}

impl<A, T, S, R, E> EarningService<A, T, S, R, E>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    S: SectorRepository,
    R: AssetUserRelationRepository,
    E: EarningRepository,
{
    pub fn new(
        onboarding: Arc<AssetOnboarding<A, T, S>>,
        asset_repo: Arc<A>,
        relation_repo: Arc<R>,
        earning_repo: Arc<E>,
    ) -> Self {
        Self {
            onboarding,
            asset_repo,
            relation_repo,
            earning_repo,
        }
    }

    pub async fn create_earning(
        &self,
        user_id: &str,
        command: CreateEarningCommand,
    ) -> Result<Earning> {
        let country = OrderRules::country(&command.country)?;
        let kind = OrderRules::validate_earning(
            &command.earning_type,
            country,
            command.amount,
            &command.currency,
        )?;
        let symbol = parse_symbol(&command.symbol)?;

        let asset = self.onboarding.ensure_asset(&symbol, country).await?;
        OrderRules::same_market(asset.symbol.as_str(), asset.country(), country)?;
        ensure_relation(self.relation_repo.as_ref(), &asset, user_id).await?;

        let earning = Earning::new(
            user_id,
            asset.id,
            kind,
            command.amount,
            command.currency.trim().to_uppercase(),
            command.date,
        );
        let earning = self.earning_repo.create(earning).await?;
        info!(
            user_id = %user_id,
            symbol = %symbol,
            earning_id = %earning.id,
            kind = %earning.kind,
            amount = %earning.amount,
            "earning created"
        );
        Ok(earning)
    }

    /// Replace an earning's type, amount, currency and date, keeping its market
    pub async fn update_earning(
        &self,
        user_id: &str,
        earning_id: EarningId,
        command: UpdateEarningCommand,
    ) -> Result<Earning> {
        let existing = self
            .earning_repo
            .find(earning_id, user_id)
            .await?
            .ok_or(LedgerError::EarningNotFound(earning_id))?;
        let asset = self
            .asset_repo
            .find_by_id(existing.asset_id)
            .await?
            .ok_or_else(|| LedgerError::AssetNotFound(existing.asset_id.to_string()))?;

        let kind = OrderRules::validate_earning(
            &command.earning_type,
            asset.country(),
            command.amount,
            &command.currency,
        )?;

        let updated = Earning {
            kind,
            amount: command.amount,
            currency: command.currency.trim().to_uppercase(),
            date: command.date,
            ..existing
        };
        self.earning_repo
            .update(updated)
            .await?
            .ok_or(LedgerError::EarningNotFound(earning_id))
    }

    pub async fn delete_earning(&self, user_id: &str, earning_id: EarningId) -> Result<()> {
        if !self.earning_repo.delete(earning_id, user_id).await? {
            return Err(LedgerError::EarningNotFound(earning_id));
        }
        info!(user_id = %user_id, earning_id = %earning_id, "earning deleted");
        Ok(())
    }

    /// A user's earnings in one asset, oldest first
    pub async fn search_earnings(&self, user_id: &str, symbol: &str) -> Result<Vec<Earning>> {
        let symbol = parse_symbol(symbol)?;
        let asset = self
            .asset_repo
            .find_by_symbol(&symbol)
            .await?
            .ok_or_else(|| LedgerError::AssetNotFound(symbol.to_string()))?;
        Ok(self.earning_repo.search(asset.id, user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MarketDataProvider;
    use crate::domain::{Country, EarningKind, Symbol, ValidationError};
    use crate::infrastructure::{
        InMemoryAssetRepository, InMemoryAssetTypeRepository, InMemoryAssetUserRelationRepository,
        InMemoryEarningRepository, InMemorySectorRepository, StaticListing, StaticMarketData,
    };
    use rust_decimal_macros::dec;

    type Service = EarningService<
        InMemoryAssetRepository,
        InMemoryAssetTypeRepository,
        InMemorySectorRepository,
        InMemoryAssetUserRelationRepository,
        InMemoryEarningRepository,
    >;

    fn service() -> (Service, Arc<InMemoryEarningRepository>, Arc<InMemoryAssetUserRelationRepository>) {
        let market_data: Arc<dyn MarketDataProvider> =
            Arc::new(StaticMarketData::with_listings([StaticListing::new(
                Symbol::new("TAEE11").unwrap(),
                Country::Br,
                "Taesa UNIT",
                "stock",
            )]));
        let assets = Arc::new(InMemoryAssetRepository::new());
        let onboarding = Arc::new(AssetOnboarding::new(
            Arc::clone(&assets),
            Arc::new(InMemoryAssetTypeRepository::new()),
            Arc::new(InMemorySectorRepository::new()),
            market_data,
        ));
        let relations = Arc::new(InMemoryAssetUserRelationRepository::new());
        let earnings = Arc::new(InMemoryEarningRepository::new());
        let service = EarningService::new(
            onboarding,
            assets,
            Arc::clone(&relations),
            Arc::clone(&earnings),
        );
        (service, earnings, relations)
    }

    fn command(earning_type: &str, amount: Decimal, currency: &str) -> CreateEarningCommand {
        CreateEarningCommand {
            symbol: "taee11".to_string(),
            country: "BR".to_string(),
            earning_type: earning_type.to_string(),
            amount,
            currency: currency.to_string(),
            date: NaiveDate::from_ymd_opt(2021, 8, 16).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let (service, earnings, relations) = service();

        let earning = service
            .create_earning("user-1", command("dividend", dec!(12.40), "brl"))
            .await
            .unwrap();
        assert_eq!(earning.kind, EarningKind::Dividend);
        assert_eq!(earning.currency, "BRL");
        assert_eq!(relations.len(), 1);

        let updated = service
            .update_earning(
                "user-1",
                earning.id,
                UpdateEarningCommand {
                    earning_type: "jcp".to_string(),
                    amount: dec!(3.10),
                    currency: "BRL".to_string(),
                    date: earning.date,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.kind, EarningKind::InterestOnCapital);
        assert_eq!(updated.id, earning.id);

        let listed = service.search_earnings("user-1", "TAEE11").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, dec!(3.10));

        service.delete_earning("user-1", earning.id).await.unwrap();
        assert!(earnings.is_empty());
        assert_eq!(
            service.delete_earning("user-1", earning.id).await,
            Err(LedgerError::EarningNotFound(earning.id))
        );
    }

    #[tokio::test]
    async fn test_second_earning_reuses_relation() {
        let (service, earnings, relations) = service();

        service
            .create_earning("user-1", command("dividend", dec!(12.40), "BRL"))
            .await
            .unwrap();
        service
            .create_earning("user-1", command("jcp", dec!(3.10), "BRL"))
            .await
            .unwrap();
        assert_eq!(earnings.len(), 2);
        assert_eq!(relations.len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_before_any_write() {
        let (service, earnings, relations) = service();

        let err = service
            .create_earning("user-1", command("dividend", dec!(12.40), "USD"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::InvalidCurrencyForMarket { .. })
        ));

        let err = service
            .create_earning("user-1", command("bonus", dec!(1), "BRL"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::Validation(ValidationError::InvalidEarningType("bonus".into()))
        );

        assert!(earnings.is_empty());
        assert!(relations.is_empty());
    }
}
