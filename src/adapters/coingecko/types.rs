//! CoinGecko `/global` wire types.

use std::collections::HashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::adapters::lenient::{de_u64, value_f64};
use crate::domain::MarketContext;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GlobalResponse {
    pub data: Option<GlobalData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GlobalData {
    #[serde(deserialize_with = "de_u64")]
    pub active_cryptocurrencies: Option<u64>,
    pub total_market_cap: Option<HashMap<String, Value>>,
    pub total_volume: Option<HashMap<String, Value>>,
    pub market_cap_percentage: Option<HashMap<String, Value>>,
}

fn lookup(map: &Option<HashMap<String, Value>>, key: &str) -> Option<f64> {
    map.as_ref()?.get(key).and_then(value_f64)
}

impl GlobalResponse {
    pub fn into_market_context(self, updated_at: i64) -> MarketContext {
        let data = self.data.unwrap_or_default();
        MarketContext {
            total_mcap_usd: lookup(&data.total_market_cap, "usd"),
            total_vol_usd: lookup(&data.total_volume, "usd"),
            btc_dominance: lookup(&data.market_cap_percentage, "btc"),
            active_cryptos: data.active_cryptocurrencies,
            updated_at,
        }
    }
}
