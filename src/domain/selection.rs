//! Candidate Selection
//!
//! Pure list operations applied between fetching and reporting:
//! - `filter_by_chain`: keep records from one chain
//! - `dedupe`: drop records already seen under the same pair key
//! - `rank`: stable sort by descending score and cap the list

use std::collections::HashSet;

use super::candidate::ScoredCandidate;
use super::chain::Chain;
use super::pair::RawPairRecord;

/// Hard cap on candidates reported per chain
pub const MAX_RESULTS_PER_CHAIN: usize = 30;

/// Records whose chain id matches `chain` (case-insensitive). Records without a
/// chain id never match.
pub fn filter_by_chain(chain: &Chain, records: Vec<RawPairRecord>) -> Vec<RawPairRecord> {
    records
        .into_iter()
        .filter(|r| r.chain_id.as_deref().is_some_and(|id| chain.matches(id)))
        .collect()
}

/// First occurrence of each (chain id, pair address), in original order
pub fn dedupe(records: Vec<RawPairRecord>) -> Vec<RawPairRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.key()))
        .collect()
}

/// Sort by descending score, keeping discovery order for ties, and keep at
/// most `limit` entries (never more than [`MAX_RESULTS_PER_CHAIN`]).
pub fn rank(mut candidates: Vec<ScoredCandidate>, limit: usize) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(limit.min(MAX_RESULTS_PER_CHAIN));
    candidates
}
