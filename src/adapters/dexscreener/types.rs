//! DexScreener search API wire types
//!
//! Every field is optional on the wire. Only `chainId` and `pairAddress`
//! are decoded strictly; a nested object of the wrong shape decodes to its
//! default. `into_record` is the single place where missing values become
//! the defaults the scorer expects.

use serde::Deserialize;
use serde_json::Value;

use crate::adapters::lenient::{de_f64, de_lenient, de_u64};
use crate::domain::{PriceChange, RawPairRecord, TokenRef, TxnCounts};

/// One pair from `/latest/dex/search`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DexPair {
    pub chain_id: Option<String>,
    #[serde(deserialize_with = "de_lenient")]
    pub dex_id: Option<String>,
    #[serde(deserialize_with = "de_lenient")]
    pub url: Option<String>,
    pub pair_address: Option<String>,
    #[serde(deserialize_with = "de_lenient")]
    pub base_token: Option<DexToken>,
    #[serde(deserialize_with = "de_f64")]
    pub price_usd: Option<f64>,
    #[serde(deserialize_with = "de_lenient")]
    pub liquidity: Option<DexLiquidity>,
    #[serde(deserialize_with = "de_lenient")]
    pub volume: Option<DexVolume>,
    #[serde(deserialize_with = "de_lenient")]
    pub txns: Option<DexTxns>,
    #[serde(deserialize_with = "de_lenient")]
    pub price_change: Option<DexPriceChange>,
    #[serde(deserialize_with = "de_f64")]
    pub fdv: Option<f64>,
    #[serde(deserialize_with = "de_f64")]
    pub market_cap: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DexToken {
    #[serde(deserialize_with = "de_lenient")]
    pub address: Option<String>,
    #[serde(deserialize_with = "de_lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "de_lenient")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DexLiquidity {
    #[serde(deserialize_with = "de_f64")]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DexVolume {
    #[serde(deserialize_with = "de_f64")]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DexTxns {
    #[serde(deserialize_with = "de_lenient")]
    pub h1: Option<DexTxnWindow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DexTxnWindow {
    #[serde(deserialize_with = "de_u64")]
    pub buys: Option<u64>,
    #[serde(deserialize_with = "de_u64")]
    pub sells: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DexPriceChange {
    #[serde(deserialize_with = "de_f64")]
    pub h1: Option<f64>,
    #[serde(deserialize_with = "de_f64")]
    pub h24: Option<f64>,
}

impl DexPair {
    pub fn into_record(self) -> RawPairRecord {
        let token = self.base_token.unwrap_or_default();
        let h1 = self.txns.and_then(|t| t.h1).unwrap_or_default();
        let change = self.price_change.unwrap_or_default();

        RawPairRecord {
            chain_id: self.chain_id,
            dex_id: self.dex_id,
            pair_address: self.pair_address,
            url: self.url,
            base_token: TokenRef {
                address: token.address,
                symbol: token.symbol,
                name: token.name,
            },
            price_usd: self.price_usd,
            liquidity_usd: self.liquidity.and_then(|l| l.usd).unwrap_or(0.0),
            volume_h24_usd: self.volume.and_then(|v| v.h24).unwrap_or(0.0),
            txns_h1: TxnCounts {
                buys: h1.buys.unwrap_or(0),
                sells: h1.sells.unwrap_or(0),
            },
            price_change: PriceChange {
                h1: change.h1.unwrap_or(0.0),
                h24: change.h24.unwrap_or(0.0),
            },
            fdv: self.fdv,
            market_cap: self.market_cap,
        }
    }
}

/// Extract pair records from a search response body.
///
/// A body that is not an object, or has no `pairs` array, yields nothing.
/// Individual entries that cannot be decoded are skipped.
pub fn records_from_search(body: Value) -> Vec<RawPairRecord> {
    let pairs = match body {
        Value::Object(mut map) => match map.remove("pairs") {
            Some(Value::Array(pairs)) => pairs,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    let total = pairs.len();
    let records: Vec<RawPairRecord> = pairs
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<DexPair>(entry) {
            Ok(pair) => Some(pair.into_record()),
            Err(e) => {
                tracing::debug!("Skipping undecodable pair entry: {}", e);
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            "Decoded {}/{} pairs from search response, skipped {}",
            records.len(),
            total,
            total - records.len()
        );
    }
    records
}
