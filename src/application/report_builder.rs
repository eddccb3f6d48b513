//! Report Builder
//!
//! Runs one scan: every (chain, query) search is spawned at once, bounded by
//! a semaphore and a per-call timeout, then joined back in configuration
//! order. Each chain's matches are deduped, scored, classified and ranked.
//!
//! Upstream failures never abort the run. A failed or timed-out query
//! contributes no records and is counted in the chain's stats; a failed
//! market snapshot yields an empty `MarketContext`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::domain::{
    dedupe, filter_by_chain, rank, ChainConfig, ChainReport, ChainScanStats, Decision,
    MarketContext, RawPairRecord, Report, ScoredCandidate, MAX_RESULTS_PER_CHAIN,
};
use crate::ports::{MarketDataError, MarketDataGateway};

/// Scan pipeline settings
#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Candidates kept per chain, capped at `MAX_RESULTS_PER_CHAIN`
    pub top_n: usize,
    /// Gateway calls in flight at once
    pub max_concurrency: usize,
    /// Upper bound on a single gateway call
    pub call_timeout: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            top_n: MAX_RESULTS_PER_CHAIN,
            max_concurrency: 4,
            call_timeout: Duration::from_secs(30),
        }
    }
}

/// Why a single gateway call produced no data
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Gateway(#[from] MarketDataError),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("task failed: {0}")]
    Task(String),
}

type SearchHandle = JoinHandle<Result<Vec<RawPairRecord>, QueryError>>;

/// Builds scan reports from a market data gateway
pub struct ReportBuilder<G> {
    gateway: Arc<G>,
    chains: Vec<ChainConfig>,
    settings: ScanSettings,
}

impl<G: MarketDataGateway + 'static> ReportBuilder<G> {
    pub fn new(gateway: Arc<G>, chains: Vec<ChainConfig>, settings: ScanSettings) -> Self {
        Self { gateway, chains, settings }
    }

    pub fn chains(&self) -> &[ChainConfig] {
        &self.chains
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Run every configured chain and assemble the report
    pub async fn build(&self) -> Report {
        let generated_at = chrono::Utc::now().timestamp();
        let permits = Arc::new(Semaphore::new(self.settings.max_concurrency.max(1)));

        tracing::info!(
            "Scanning {} chains ({} queries, concurrency {})",
            self.chains.len(),
            self.chains.iter().map(|c| c.queries.len()).sum::<usize>(),
            self.settings.max_concurrency
        );

        let market_task = self.spawn_market_snapshot(Arc::clone(&permits));
        let searches: Vec<Vec<SearchHandle>> = self
            .chains
            .iter()
            .map(|config| {
                config
                    .queries
                    .iter()
                    .map(|query| self.spawn_search(query.clone(), Arc::clone(&permits)))
                    .collect()
            })
            .collect();

        let mut chains = Vec::with_capacity(self.chains.len());
        for (config, handles) in self.chains.iter().zip(searches) {
            chains.push(self.collect_chain(config, handles).await);
        }

        let market_context = match join(market_task).await {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!("Market snapshot unavailable: {}", e);
                MarketContext::unavailable(generated_at)
            }
        };

        let report = Report { generated_at, market_context, chains };
        tracing::info!(
            "Scan complete: {} candidates, {} failed queries",
            report.total_candidates(),
            report.failed_queries()
        );
        report
    }

    /// Run a single query for one chain through filter, dedupe, scoring and ranking
    pub async fn search_chain(
        &self,
        config: &ChainConfig,
        query: &str,
    ) -> Result<Vec<ScoredCandidate>, QueryError> {
        let permits = Arc::new(Semaphore::new(1));
        let records = join(self.spawn_search(query.to_string(), permits)).await?;
        let stats = ChainScanStats { queries: 1, ..ChainScanStats::default() };
        let matched = filter_by_chain(&config.chain, records);
        Ok(assemble_chain(config, matched, stats, self.settings.top_n).candidates)
    }

    async fn collect_chain(&self, config: &ChainConfig, handles: Vec<SearchHandle>) -> ChainReport {
        let mut stats = ChainScanStats { queries: handles.len(), ..ChainScanStats::default() };
        let mut matched = Vec::new();

        for (query, handle) in config.queries.iter().zip(handles) {
            match join(handle).await {
                Ok(records) => {
                    let hits = filter_by_chain(&config.chain, records);
                    tracing::debug!("{} / '{}': {} matching pairs", config.chain, query, hits.len());
                    matched.extend(hits);
                }
                Err(e) => {
                    stats.failed_queries += 1;
                    tracing::warn!("{} / '{}': query failed, skipping: {}", config.chain, query, e);
                }
            }
        }

        let report = assemble_chain(config, matched, stats, self.settings.top_n);
        tracing::info!(
            "{}: {}/{} queries ok, {} matches, {} unique, {} TRADE / {} WATCH",
            report.chain,
            report.stats.queries - report.stats.failed_queries,
            report.stats.queries,
            report.stats.raw_matches,
            report.stats.unique_pairs,
            report.count(Decision::Trade),
            report.count(Decision::Watch)
        );
        report
    }

    fn spawn_search(&self, query: String, permits: Arc<Semaphore>) -> SearchHandle {
        let gateway = Arc::clone(&self.gateway);
        let timeout = self.settings.call_timeout;

        tokio::spawn(async move { bounded_call(permits, timeout, gateway.search_pairs(&query)).await })
    }

    fn spawn_market_snapshot(&self, permits: Arc<Semaphore>) -> JoinHandle<Result<MarketContext, QueryError>> {
        let gateway = Arc::clone(&self.gateway);
        let timeout = self.settings.call_timeout;

        tokio::spawn(async move { bounded_call(permits, timeout, gateway.global_market_snapshot()).await })
    }
}

/// Run a gateway call under a concurrency permit and a deadline
async fn bounded_call<T, F>(permits: Arc<Semaphore>, timeout: Duration, call: F) -> Result<T, QueryError>
where
    F: Future<Output = Result<T, MarketDataError>>,
{
    let _permit = permits
        .acquire_owned()
        .await
        .map_err(|e| QueryError::Task(e.to_string()))?;

    match tokio::time::timeout(timeout, call).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(QueryError::TimedOut(timeout)),
    }
}

async fn join<T>(handle: JoinHandle<Result<T, QueryError>>) -> Result<T, QueryError> {
    handle.await.map_err(|e| QueryError::Task(e.to_string()))?
}

/// Dedupe, score, classify and rank one chain's merged matches
pub fn assemble_chain(
    config: &ChainConfig,
    matched: Vec<RawPairRecord>,
    mut stats: ChainScanStats,
    top_n: usize,
) -> ChainReport {
    stats.raw_matches = matched.len();
    let unique = dedupe(matched);
    stats.unique_pairs = unique.len();

    let candidates: Vec<ScoredCandidate> = unique
        .into_iter()
        .map(|record| ScoredCandidate::evaluate(record, config))
        .inspect(|c| {
            tracing::debug!(
                "{} {} score={:.2} liq={:.2} vol={:.2} flow={:.2} mom={:.2} -> {}",
                config.chain,
                c.label(),
                c.score,
                c.breakdown.liquidity,
                c.breakdown.volume,
                c.breakdown.flow,
                c.breakdown.momentum,
                c.decision
            );
        })
        .collect();

    ChainReport {
        chain: config.chain.clone(),
        candidates: rank(candidates, top_n),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::market_data::MockMarketDataGateway;
    use crate::ports::MockGateway;

    fn base_config() -> ChainConfig {
        ChainConfig::new("base", "https://basescan.org/token/{token}")
            .with_min_liquidity(35_000.0)
            .with_min_volume(80_000.0)
            .with_queries(["base", "meme"])
    }

    fn bsc_config() -> ChainConfig {
        ChainConfig::new("bsc", "https://bscscan.com/token/{token}")
            .with_min_liquidity(50_000.0)
            .with_min_volume(120_000.0)
            .with_queries(["bnb", "meme"])
    }

    fn strong_pair(chain: &str, address: &str) -> RawPairRecord {
        RawPairRecord::new(chain, address)
            .with_base_token(&format!("{}-token", address), "STRONG", "Strong")
            .with_liquidity(200_000.0)
            .with_volume(150_000.0)
            .with_txns_h1(40, 10)
            .with_price_change(5.0, 12.0)
    }

    fn settings() -> ScanSettings {
        ScanSettings {
            call_timeout: Duration::from_millis(500),
            ..ScanSettings::default()
        }
    }

    #[test]
    fn test_assemble_chain_counts_and_ranks() {
        let matched = vec![
            RawPairRecord::new("base", "weak").with_liquidity(10.0),
            strong_pair("base", "strong"),
            strong_pair("base", "strong"),
        ];

        let report = assemble_chain(&base_config(), matched, ChainScanStats::default(), 30);

        assert_eq!(report.stats.raw_matches, 3);
        assert_eq!(report.stats.unique_pairs, 2);
        assert_eq!(report.candidates.len(), 2);
        assert_eq!(report.candidates[0].pair_address.as_deref(), Some("strong"));
        assert_eq!(report.candidates[0].decision, Decision::Trade);
        assert_eq!(report.candidates[1].decision, Decision::Avoid);
    }

    #[tokio::test]
    async fn test_build_calls_every_query_once() {
        let mut gateway = MockMarketDataGateway::new();
        gateway
            .expect_search_pairs()
            .times(4)
            .returning(|_| Ok(Vec::new()));
        gateway
            .expect_global_market_snapshot()
            .times(1)
            .returning(|| Ok(MarketContext::unavailable(1)));

        let builder = ReportBuilder::new(
            Arc::new(gateway),
            vec![base_config(), bsc_config()],
            settings(),
        );
        let report = builder.build().await;

        assert_eq!(report.chains.len(), 2);
        assert!(report.is_empty());
        assert_eq!(report.failed_queries(), 0);
    }

    #[tokio::test]
    async fn test_shared_query_results_split_by_chain() {
        let gateway = MockGateway::new().with_pairs(
            "meme",
            vec![
                strong_pair("base", "0xbase"),
                strong_pair("bsc", "0xbsc"),
                strong_pair("solana", "So1"),
            ],
        );

        let builder = ReportBuilder::new(
            Arc::new(gateway),
            vec![base_config(), bsc_config()],
            settings(),
        );
        let report = builder.build().await;

        let base = &report.chains[0];
        let bsc = &report.chains[1];
        assert_eq!(base.candidates.len(), 1);
        assert_eq!(base.candidates[0].pair_address.as_deref(), Some("0xbase"));
        assert_eq!(bsc.candidates.len(), 1);
        assert_eq!(bsc.candidates[0].pair_address.as_deref(), Some("0xbsc"));
    }

    #[tokio::test]
    async fn test_market_failure_is_not_fatal() {
        let gateway = MockGateway::new()
            .with_pairs("base", vec![strong_pair("base", "0x1")])
            .with_market_failure(MarketDataError::Status { status: 503, body: String::new() });

        let builder = ReportBuilder::new(Arc::new(gateway), vec![base_config()], settings());
        let report = builder.build().await;

        assert!(!report.market_context.is_available());
        assert_eq!(report.market_context.updated_at, report.generated_at);
        assert_eq!(report.total_candidates(), 1);
    }

    #[tokio::test]
    async fn test_search_chain_single_query() {
        let gateway = MockGateway::new().with_pairs(
            "brett",
            vec![strong_pair("base", "0x1"), strong_pair("bsc", "0x2"), strong_pair("base", "0x1")],
        );
        let builder = ReportBuilder::new(Arc::new(gateway), vec![base_config()], settings());

        let candidates = builder.search_chain(&base_config(), "brett").await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].score, 93.84);
    }

    #[tokio::test]
    async fn test_search_chain_propagates_failure() {
        let gateway = MockGateway::new().with_failure("brett", MarketDataError::RateLimited);
        let builder = ReportBuilder::new(Arc::new(gateway), vec![base_config()], settings());

        let result = builder.search_chain(&base_config(), "brett").await;
        assert!(matches!(result, Err(QueryError::Gateway(MarketDataError::RateLimited))));
    }
}
