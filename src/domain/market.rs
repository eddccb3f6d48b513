use serde::{Deserialize, Serialize};

/// Snapshot of global crypto market statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub total_mcap_usd: Option<f64>,
    pub total_vol_usd: Option<f64>,
    /// BTC share of total market cap, in percent
    pub btc_dominance: Option<f64>,
    pub active_cryptos: Option<u64>,
    /// Capture time, unix seconds
    pub updated_at: i64,
}

impl MarketContext {
    /// Snapshot with no statistics, used when the upstream fetch fails
    pub fn unavailable(updated_at: i64) -> Self {
        Self {
            total_mcap_usd: None,
            total_vol_usd: None,
            btc_dominance: None,
            active_cryptos: None,
            updated_at,
        }
    }

    pub fn is_available(&self) -> bool {
        self.total_mcap_usd.is_some()
            || self.total_vol_usd.is_some()
            || self.btc_dominance.is_some()
            || self.active_cryptos.is_some()
    }
}
