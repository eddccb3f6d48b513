//! Domain Layer - Candidate scoring pipeline
//!
//! Pure types and functions with no I/O. All market data arrives through
//! the ports layer already normalized.
//!
//! - `chain`: chain identifiers and per-chain tunables
//! - `pair`: normalized pair record
//! - `scoring`: 0-100 composite score
//! - `classifier`: TRADE / WATCH / AVOID buckets
//! - `candidate`: scored, classified view of a pair
//! - `selection`: chain filter, dedupe and ranking
//! - `market`: global market snapshot
//! - `report`: per-chain results assembled into one document

pub mod chain;
pub mod pair;
pub mod scoring;
pub mod classifier;
pub mod candidate;
pub mod selection;
pub mod market;
pub mod report;

pub use chain::{Chain, ChainConfig, TOKEN_PLACEHOLDER};
pub use pair::{PairKey, PriceChange, RawPairRecord, TokenRef, TxnCounts};
pub use scoring::{score, ScoreBreakdown, SCORE_MAX};
pub use classifier::{classify, Decision, TRADE_SCORE, WATCH_SCORE};
pub use candidate::ScoredCandidate;
pub use selection::{dedupe, filter_by_chain, rank, MAX_RESULTS_PER_CHAIN};
pub use market::MarketContext;
pub use report::{ChainReport, ChainScanStats, Report, REPORT_NOTES};
