//! HTTP Market Data Gateway
//!
//! Implements `MarketDataGateway` over DexScreener (pair search) and
//! CoinGecko (global snapshot). Each host gets its own fetcher so pacing
//! one API never delays the other.

use async_trait::async_trait;

use crate::config::SourcesSection;
use crate::domain::{MarketContext, RawPairRecord};
use crate::ports::{MarketDataError, MarketDataGateway};
use super::coingecko::CoinGeckoClient;
use super::dexscreener::DexScreenerClient;
use super::http::{HttpConfig, HttpFetcher};

#[derive(Debug, Clone)]
pub struct HttpMarketGateway {
    dexscreener: DexScreenerClient,
    coingecko: CoinGeckoClient,
}

impl HttpMarketGateway {
    pub fn new(dexscreener: DexScreenerClient, coingecko: CoinGeckoClient) -> Self {
        Self { dexscreener, coingecko }
    }

    /// Build both clients from the `[sources]` config section
    pub fn from_sources(sources: &SourcesSection) -> Result<Self, MarketDataError> {
        let http = HttpConfig::from(sources);
        let dexscreener = DexScreenerClient::new(
            HttpFetcher::new(&http)?,
            sources.get_dexscreener_url(),
        );
        let coingecko = CoinGeckoClient::new(
            HttpFetcher::new(&http)?,
            sources.get_coingecko_url(),
        );
        Ok(Self::new(dexscreener, coingecko))
    }
}

#[async_trait]
impl MarketDataGateway for HttpMarketGateway {
    async fn search_pairs(&self, query: &str) -> Result<Vec<RawPairRecord>, MarketDataError> {
        self.dexscreener.search(query).await
    }

    async fn global_market_snapshot(&self) -> Result<MarketContext, MarketDataError> {
        self.coingecko.global().await
    }
}
