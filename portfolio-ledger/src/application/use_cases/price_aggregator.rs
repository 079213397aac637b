use crate::application::ports::{MarketDataProvider, ProviderError};
use crate::domain::{Country, Symbol, SymbolPrice};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout, timeout_at};
use tracing::{debug, warn};

/// Concurrent price lookups with a bounded fan-out and a batch deadline.
///
/// A batch never fails as a whole: symbols whose lookup errors, panics or is
/// still pending at the deadline are left out of the result. Results are
/// keyed by symbol, never by arrival order.
pub struct PriceAggregator {
    market_data: Arc<dyn MarketDataProvider>,
    deadline: Duration,
    max_in_flight: usize,
}

impl PriceAggregator {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        deadline: Duration,
        max_in_flight: usize,
    ) -> Self {
        Self {
            market_data,
            deadline,
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Fetch prices for a batch of symbols in one market
    pub async fn fetch_prices(
        &self,
        symbols: &[Symbol],
        country: Country,
    ) -> HashMap<Symbol, SymbolPrice> {
        let deadline = Instant::now() + self.deadline;
        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();

        let mut seen = HashSet::new();
        for symbol in symbols.iter().filter(|s| seen.insert(*s)) {
            let market_data = Arc::clone(&self.market_data);
            let permits = Arc::clone(&permits);
            let symbol = symbol.clone();
            tasks.spawn(async move {
                // Closed only if the batch is torn down, in which case this task is aborted too
                let _permit = permits.acquire_owned().await.ok();
                let result = market_data.price(&symbol, country).await;
                (symbol, result)
            });
        }

        let expected = tasks.len();
        let mut prices = HashMap::with_capacity(expected);
        loop {
            match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((symbol, Ok(price))))) => {
                    prices.insert(symbol, price);
                }
                Ok(Some(Ok((symbol, Err(err))))) => {
                    warn!(symbol = %symbol, country = %country, error = %err, "price lookup failed, omitting");
                }
                Ok(Some(Err(err))) => {
                    warn!(error = %err, "price task did not complete");
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        pending = tasks.len(),
                        deadline_ms = self.deadline.as_millis() as u64,
                        "price batch deadline reached, omitting pending symbols"
                    );
                    tasks.abort_all();
                    break;
                }
            }
        }

        debug!(requested = expected, priced = prices.len(), country = %country, "price batch done");
        prices
    }

    /// Fetch one price, surfacing the provider error
    pub async fn fetch_price(
        &self,
        symbol: &Symbol,
        country: Country,
    ) -> Result<SymbolPrice, ProviderError> {
        timeout(self.deadline, self.market_data.price(symbol, country))
            .await
            .map_err(|_| ProviderError::Timeout(self.deadline.as_millis() as u64))?
    }
}
