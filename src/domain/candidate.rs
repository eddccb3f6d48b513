//! Scored candidate: a pair record plus its score, decision and explorer link.

use serde::Serialize;

use super::chain::{Chain, ChainConfig};
use super::classifier::{classify, Decision};
use super::pair::{PriceChange, RawPairRecord, TxnCounts};
use super::scoring::ScoreBreakdown;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub decision: Decision,
    pub score: f64,
    #[serde(skip)]
    pub breakdown: ScoreBreakdown,
    pub chain: Chain,
    pub dex: Option<String>,
    pub pair_address: Option<String>,
    pub pair_url: Option<String>,
    pub token_symbol: Option<String>,
    pub token_name: Option<String>,
    pub token_address: Option<String>,
    pub explorer: Option<String>,
    pub price_usd: Option<f64>,
    pub liq_usd: f64,
    pub vol24_usd: f64,
    pub txns_h1: TxnCounts,
    pub price_change: PriceChange,
    pub fdv: Option<f64>,
    pub market_cap: Option<f64>,
}

impl ScoredCandidate {
    /// Score and classify a record under its chain's config
    pub fn evaluate(record: RawPairRecord, config: &ChainConfig) -> Self {
        let breakdown = ScoreBreakdown::from_record(&record);
        let score = breakdown.total();
        let decision = classify(score, record.liquidity_usd, record.volume_h24_usd, config);
        let explorer = config.explorer_link(record.base_token.address.as_deref());

        Self {
            decision,
            score,
            breakdown,
            chain: config.chain.clone(),
            dex: record.dex_id,
            pair_address: record.pair_address,
            pair_url: record.url,
            token_symbol: record.base_token.symbol,
            token_name: record.base_token.name,
            token_address: record.base_token.address,
            explorer,
            price_usd: record.price_usd,
            liq_usd: record.liquidity_usd,
            vol24_usd: record.volume_h24_usd,
            txns_h1: record.txns_h1,
            price_change: record.price_change,
            fdv: record.fdv,
            market_cap: record.market_cap,
        }
    }

    /// Symbol for display, falling back to the pair address
    pub fn label(&self) -> &str {
        self.token_symbol
            .as_deref()
            .or(self.pair_address.as_deref())
            .unwrap_or("?")
    }
}
