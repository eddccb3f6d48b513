//! DexScreener Adapter
//!
//! Pair search used to discover candidates on every configured chain.

mod client;
pub mod types;

pub use client::{DexScreenerClient, DEFAULT_DEXSCREENER_URL};
pub use types::{records_from_search, DexPair};
