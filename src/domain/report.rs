//! Scan Report
//!
//! Output of one scan run. Chains keep configuration order both in memory and
//! when serialized, so `results` and `scan_stats` render as JSON objects whose
//! keys follow the config file.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::candidate::ScoredCandidate;
use super::chain::Chain;
use super::classifier::Decision;
use super::market::MarketContext;

/// Advisory notes attached to every report
pub const REPORT_NOTES: [&str; 2] = [
    "Explorer links are provided for manual contract checks before execution.",
    "This is a research scanner, not autonomous execution advice.",
];

/// Fetch statistics for one chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChainScanStats {
    /// Search queries issued
    pub queries: usize,
    /// Queries that errored or timed out (counted as zero records)
    pub failed_queries: usize,
    /// Records matching the chain, before dedupe
    pub raw_matches: usize,
    /// Records left after dedupe
    pub unique_pairs: usize,
}

/// Ranked candidates for one chain
#[derive(Debug, Clone, PartialEq)]
pub struct ChainReport {
    pub chain: Chain,
    pub candidates: Vec<ScoredCandidate>,
    pub stats: ChainScanStats,
}

impl ChainReport {
    pub fn count(&self, decision: Decision) -> usize {
        self.candidates.iter().filter(|c| c.decision == decision).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Unix seconds
    pub generated_at: i64,
    pub market_context: MarketContext,
    pub chains: Vec<ChainReport>,
}

impl Report {
    pub fn results_for(&self, chain: &Chain) -> Option<&[ScoredCandidate]> {
        self.chain(chain).map(|c| c.candidates.as_slice())
    }

    pub fn stats_for(&self, chain: &Chain) -> Option<ChainScanStats> {
        self.chain(chain).map(|c| c.stats)
    }

    pub fn chain(&self, chain: &Chain) -> Option<&ChainReport> {
        self.chains.iter().find(|c| &c.chain == chain)
    }

    pub fn total_candidates(&self) -> usize {
        self.chains.iter().map(|c| c.candidates.len()).sum()
    }

    pub fn failed_queries(&self) -> usize {
        self.chains.iter().map(|c| c.stats.failed_queries).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_candidates() == 0
    }
}

struct ResultsMap<'a>(&'a [ChainReport]);

impl Serialize for ResultsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|c| (c.chain.as_str(), &c.candidates)))
    }
}

struct StatsMap<'a>(&'a [ChainReport]);

impl Serialize for StatsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|c| (c.chain.as_str(), &c.stats)))
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Report", 5)?;
        state.serialize_field("generated_at", &self.generated_at)?;
        state.serialize_field("market_context", &self.market_context)?;
        state.serialize_field("results", &ResultsMap(&self.chains))?;
        state.serialize_field("scan_stats", &StatsMap(&self.chains))?;
        state.serialize_field("notes", &REPORT_NOTES)?;
        state.end()
    }
}
