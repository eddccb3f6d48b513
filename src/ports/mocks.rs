use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use async_trait::async_trait;

use crate::domain::{MarketContext, RawPairRecord};
use super::market_data::{MarketDataError, MarketDataGateway};

#[derive(Debug, Clone)]
enum SearchResponse {
    Pairs(Vec<RawPairRecord>),
    Fail(MarketDataError),
}

/// Gateway that records calls and serves canned responses per query.
///
/// Queries without a configured response return no pairs.
#[derive(Debug, Clone)]
pub struct MockGateway {
    calls: Arc<Mutex<Vec<String>>>,
    responses: HashMap<String, SearchResponse>,
    delays: HashMap<String, Duration>,
    market: Result<MarketContext, MarketDataError>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            responses: HashMap::new(),
            delays: HashMap::new(),
            market: Ok(MarketContext::unavailable(0)),
        }
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to serve `pairs` for `query`
    pub fn with_pairs(mut self, query: &str, pairs: Vec<RawPairRecord>) -> Self {
        self.responses.insert(query.to_string(), SearchResponse::Pairs(pairs));
        self
    }

    /// Builder method to fail `query` with `error`
    pub fn with_failure(mut self, query: &str, error: MarketDataError) -> Self {
        self.responses.insert(query.to_string(), SearchResponse::Fail(error));
        self
    }

    /// Builder method to stall `query` before responding
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_market(mut self, market: MarketContext) -> Self {
        self.market = Ok(market);
        self
    }

    pub fn with_market_failure(mut self, error: MarketDataError) -> Self {
        self.market = Err(error);
        self
    }

    /// Every search query received, in arrival order
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl MarketDataGateway for MockGateway {
    async fn search_pairs(&self, query: &str) -> Result<Vec<RawPairRecord>, MarketDataError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_string());

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(query) {
            Some(SearchResponse::Pairs(pairs)) => Ok(pairs.clone()),
            Some(SearchResponse::Fail(err)) => Err(err.clone()),
            None => Ok(Vec::new()),
        }
    }

    async fn global_market_snapshot(&self) -> Result<MarketContext, MarketDataError> {
        self.market.clone()
    }
}
