//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - DexScreener: pair search API client
//! - CoinGecko: global market snapshot client
//! - Gateway: `MarketDataGateway` over both APIs
//! - CLI: Command-line interface definitions
//!
//! Shared HTTP plumbing (pacing, retries, tolerant decoding) lives in
//! `http`, `rate_limit` and `lenient`.

pub mod cli;
pub mod coingecko;
pub mod dexscreener;
pub mod gateway;
pub mod http;
pub mod lenient;
pub mod rate_limit;

pub use cli::CliApp;
pub use coingecko::CoinGeckoClient;
pub use dexscreener::DexScreenerClient;
pub use gateway::HttpMarketGateway;
pub use http::{HttpConfig, HttpFetcher};
pub use rate_limit::RateLimiter;
