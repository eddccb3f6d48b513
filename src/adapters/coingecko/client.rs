use crate::adapters::http::HttpFetcher;
use crate::domain::MarketContext;
use crate::ports::MarketDataError;
use super::types::GlobalResponse;

pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko client for the global market snapshot
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    fetcher: HttpFetcher,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(fetcher: HttpFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn global_url(&self) -> String {
        format!("{}/global", self.base_url)
    }

    /// Fetch `/global` and stamp it with the capture time
    pub async fn global(&self) -> Result<MarketContext, MarketDataError> {
        let response: GlobalResponse = self.fetcher.get_json(&self.global_url(), &[]).await?;
        Ok(response.into_market_context(chrono::Utc::now().timestamp()))
    }
}
