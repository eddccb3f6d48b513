use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{MarketContext, RawPairRecord};

/// Market data error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Rate limited by upstream API")]
    RateLimited,

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Data parsing error: {0}")]
    Parse(String),
}

impl MarketDataError {
    /// Transport failures, 429 and 5xx are worth another attempt
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(_) | MarketDataError::RateLimited | MarketDataError::Timeout(_) => true,
            MarketDataError::Status { status, .. } => *status >= 500,
            MarketDataError::Parse(_) => false,
        }
    }
}

/// Market data gateway port
///
/// The scan pipeline depends only on these two calls. Transport, headers,
/// pacing and retries belong to the adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// Free-text pair search. Returns normalized records from every chain.
    async fn search_pairs(&self, query: &str) -> Result<Vec<RawPairRecord>, MarketDataError>;

    /// Global market statistics
    async fn global_market_snapshot(&self) -> Result<MarketContext, MarketDataError>;
}
