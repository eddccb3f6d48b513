//! DexScreener API Client
//!
//! Free-text pair search across all chains DexScreener indexes.

use serde_json::Value;

use crate::adapters::http::HttpFetcher;
use crate::domain::RawPairRecord;
use crate::ports::MarketDataError;
use super::types::records_from_search;

pub const DEFAULT_DEXSCREENER_URL: &str = "https://api.dexscreener.com";

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    fetcher: HttpFetcher,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(fetcher: HttpFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}/latest/dex/search", self.base_url)
    }

    /// Search pairs by free text (symbol, name, chain keyword, address)
    pub async fn search(&self, query: &str) -> Result<Vec<RawPairRecord>, MarketDataError> {
        let body: Value = self.fetcher
            .get_json(&self.search_url(), &[("q", query)])
            .await?;
        let records = records_from_search(body);
        tracing::debug!("DexScreener query '{}' returned {} pairs", query, records.len());
        Ok(records)
    }
}
