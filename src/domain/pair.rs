//! Normalized DEX pair record
//!
//! Produced once at the market data boundary. Every optional upstream
//! field has already been defaulted, so scoring and classification can
//! read the numbers directly.

use serde::Serialize;

/// Base token of a pair
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenRef {
    pub address: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

/// Buy/sell transaction counts over a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TxnCounts {
    pub buys: u64,
    pub sells: u64,
}

/// Price change percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceChange {
    pub h1: f64,
    pub h24: f64,
}

/// Identity of a pair across search queries: (lowercased chain id, pair address)
pub type PairKey = (Option<String>, Option<String>);

/// One trading pair as returned by a search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPairRecord {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub pair_address: Option<String>,
    pub url: Option<String>,
    pub base_token: TokenRef,
    pub price_usd: Option<f64>,
    /// 0 when absent upstream
    pub liquidity_usd: f64,
    /// 0 when absent upstream
    pub volume_h24_usd: f64,
    pub txns_h1: TxnCounts,
    pub price_change: PriceChange,
    pub fdv: Option<f64>,
    pub market_cap: Option<f64>,
}

impl RawPairRecord {
    pub fn new(chain_id: impl Into<String>, pair_address: impl Into<String>) -> Self {
        Self {
            chain_id: Some(chain_id.into()),
            pair_address: Some(pair_address.into()),
            ..Self::default()
        }
    }

    pub fn with_base_token(mut self, address: &str, symbol: &str, name: &str) -> Self {
        self.base_token = TokenRef {
            address: Some(address.to_string()),
            symbol: Some(symbol.to_string()),
            name: Some(name.to_string()),
        };
        self
    }

    pub fn with_liquidity(mut self, usd: f64) -> Self {
        self.liquidity_usd = usd;
        self
    }

    pub fn with_volume(mut self, usd: f64) -> Self {
        self.volume_h24_usd = usd;
        self
    }

    pub fn with_txns_h1(mut self, buys: u64, sells: u64) -> Self {
        self.txns_h1 = TxnCounts { buys, sells };
        self
    }

    pub fn with_price_change(mut self, h1: f64, h24: f64) -> Self {
        self.price_change = PriceChange { h1, h24 };
        self
    }

    /// Dedup identity key
    pub fn key(&self) -> PairKey {
        (
            self.chain_id.as_deref().map(str::to_lowercase),
            self.pair_address.clone(),
        )
    }
}
