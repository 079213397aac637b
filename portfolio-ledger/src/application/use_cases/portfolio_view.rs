use super::order_service::parse_symbol;
use crate::application::ports::{
    AssetRepository, AssetTypeRepository, AssetUserRelationRepository, EarningRepository,
    OrderQuery, OrderRepository, RepositoryError, SectorRepository,
};
use crate::application::use_cases::{AssetOnboarding, PriceAggregator};
use crate::domain::{
    Asset, AssetKind, Country, Earning, Order, OrderRules, PositionResume, Symbol, SymbolPrice,
};
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Which decorations to attach to an asset view
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetViewQuery {
    pub with_orders: bool,
    pub with_earnings: bool,
    pub with_resume: bool,
    pub with_price: bool,
}

impl AssetViewQuery {
    pub fn everything() -> Self {
        Self {
            with_orders: true,
            with_earnings: true,
            with_resume: true,
            with_price: true,
        }
    }

    fn needs_history(&self) -> bool {
        self.with_orders || self.with_earnings || self.with_resume
    }
}

/// An asset decorated with one user's history and, optionally, a live price
#[derive(Debug, Clone, Serialize)]
pub struct AssetView {
    pub asset: Asset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<Order>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Vec<Earning>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<PositionResume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<SymbolPrice>,
}

type History = (Vec<Order>, Vec<Earning>);

/// Read-side composition of assets, history, resume and prices.
///
/// Live prices are decoration: a failed lookup leaves `price` empty and is
/// logged, it never fails the view.
pub struct PortfolioView<A, T, S, R, O, E>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    S: SectorRepository,
    R: AssetUserRelationRepository,
    O: OrderRepository,
    E: EarningRepository,
{
    onboarding: Arc<AssetOnboarding<A, T, S>>,
    prices: Arc<PriceAggregator>,
    asset_repo: Arc<A>,
    relation_repo: Arc<R>,
    order_repo: Arc<O>,
    earning_repo: Arc<E>,
}

impl<A, T, S, R, O, E> PortfolioView<A, T, S, R, O, E>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    S: SectorRepository,
    R: AssetUserRelationRepository,
    O: OrderRepository,
    E: EarningRepository,
{
    pub fn new(
        onboarding: Arc<AssetOnboarding<A, T, S>>,
        prices: Arc<PriceAggregator>,
        asset_repo: Arc<A>,
        relation_repo: Arc<R>,
        order_repo: Arc<O>,
        earning_repo: Arc<E>,
    ) -> Self {
        Self {
            onboarding,
            prices,
            asset_repo,
            relation_repo,
            order_repo,
            earning_repo,
        }
    }

    /// View one asset, onboarding it if this is the first time it is seen.
    ///
    /// The price request runs alongside the history reads.
    pub async fn asset_view(
        &self,
        user_id: &str,
        symbol: &str,
        country: &str,
        query: AssetViewQuery,
    ) -> Result<AssetView> {
        let country = OrderRules::country(country)?;
        let symbol = parse_symbol(symbol)?;
        let asset = self.onboarding.ensure_asset(&symbol, country).await?;

        let price = async {
            if query.with_price {
                self.single_price(&asset.symbol, asset.country()).await
            } else {
                None
            }
        };
        let history = async {
            if query.needs_history() {
                self.history(&asset, user_id).await.map(Some)
            } else {
                Ok(None)
            }
        };
        let (price, history) = tokio::join!(price, history);

        Self::compose(asset, history?, price, query)
    }

    /// Every asset in a user's portfolio with its history and resume.
    ///
    /// Prices are fetched in one batch per market.
    pub async fn user_portfolio(&self, user_id: &str, with_prices: bool) -> Result<Vec<AssetView>> {
        let mut assets = Vec::new();
        for relation in self.relation_repo.list_for_user(user_id).await? {
            match self.asset_repo.find_by_id(relation.asset_id).await? {
                Some(asset) => assets.push(asset),
                None => warn!(user_id = %user_id, asset_id = %relation.asset_id, "relation points to a missing asset"),
            }
        }
        assets.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let prices = async {
            if with_prices {
                self.batch_prices(&assets).await
            } else {
                HashMap::new()
            }
        };
        let histories = async {
            let mut histories = Vec::with_capacity(assets.len());
            for asset in &assets {
                histories.push(self.history(asset, user_id).await?);
            }
            Ok::<_, RepositoryError>(histories)
        };
        let (mut prices, histories) = tokio::join!(prices, histories);
        let histories = histories?;

        let query = AssetViewQuery {
            with_price: with_prices,
            ..AssetViewQuery::everything()
        };
        assets
            .into_iter()
            .zip(histories)
            .map(|(asset, history)| {
                let price = prices.remove(&asset.symbol);
                Self::compose(asset, Some(history), price, query)
            })
            .collect()
    }

    /// Assets of one kind in one market, regardless of owner
    pub async fn assets_by_type(&self, kind: AssetKind, country: Country) -> Result<Vec<Asset>> {
        Ok(self.asset_repo.list_by_asset_type(kind, country).await?)
    }

    async fn history(&self, asset: &Asset, user_id: &str) -> std::result::Result<History, RepositoryError> {
        tokio::try_join!(
            self.order_repo.search(asset.id, user_id, OrderQuery::default()),
            self.earning_repo.search(asset.id, user_id),
        )
    }

    async fn single_price(&self, symbol: &Symbol, country: Country) -> Option<SymbolPrice> {
        match self.prices.fetch_price(symbol, country).await {
            Ok(price) => Some(price),
            Err(err) => {
                warn!(symbol = %symbol, error = %err, "live price unavailable");
                None
            }
        }
    }

    async fn batch_prices(&self, assets: &[Asset]) -> HashMap<Symbol, SymbolPrice> {
        let symbols_in = |country: Country| -> Vec<Symbol> {
            assets
                .iter()
                .filter(|a| a.country() == country)
                .map(|a| a.symbol.clone())
                .collect()
        };
        let br = symbols_in(Country::Br);
        let us = symbols_in(Country::Us);

        let (mut prices, us_prices) = tokio::join!(
            self.prices.fetch_prices(&br, Country::Br),
            self.prices.fetch_prices(&us, Country::Us),
        );
        prices.extend(us_prices);
        debug!(requested = assets.len(), priced = prices.len(), "portfolio prices fetched");
        prices
    }

    fn compose(
        asset: Asset,
        history: Option<History>,
        price: Option<SymbolPrice>,
        query: AssetViewQuery,
    ) -> Result<AssetView> {
        let (orders, earnings) = history.unwrap_or_default();
        let resume = if query.with_resume {
            Some(PositionResume::from_history(&orders, &earnings)?)
        } else {
            None
        };
        Ok(AssetView {
            asset,
            orders: query.with_orders.then_some(orders),
            earnings: query.with_earnings.then_some(earnings),
            resume,
            price,
        })
    }
}
