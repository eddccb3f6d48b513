//! CoinGecko Adapter
//!
//! Global market statistics attached to every scan report.

mod client;
pub mod types;

pub use client::{CoinGeckoClient, DEFAULT_COINGECKO_URL};
pub use types::GlobalResponse;
