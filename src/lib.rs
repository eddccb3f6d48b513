//! Pair Scout - Multi-chain DEX pair scanner library
//!
//! Fans out DexScreener searches across configured chains, scores each pair
//! on liquidity, volume, order flow and momentum, and assembles a ranked
//! TRADE / WATCH / AVOID report with a global market snapshot.
//!
//! # Modules
//!
//! - `domain`: Scoring, classification, selection and report types
//! - `ports`: Trait abstractions (MarketDataGateway)
//! - `adapters`: External implementations (DexScreener, CoinGecko, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Concurrent report builder and output

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
