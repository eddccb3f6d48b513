//! Composite Pair Score
//!
//! Scores a pair from 0 to 100 as the sum of four independently clamped
//! sub-scores:
//! - Liquidity (0-30): `log10(max(liq, 1)) * 6`
//! - Volume (0-30): same transform on 24h volume
//! - Flow (0-20): `((buys_h1 + 1) / (sells_h1 + 1)) * 6`
//! - Momentum (0-20): `(chg_h1 * 1.2 + chg_h24 * 0.3) / 2.5 + 10`
//!
//! Depth dimensions are logarithmic because liquidity and volume span many
//! orders of magnitude. The +1 in the flow ratio smooths low transaction
//! counts. Momentum centres a flat pair at 10.

use serde::Serialize;

use super::pair::RawPairRecord;

pub const LIQUIDITY_MAX: f64 = 30.0;
pub const VOLUME_MAX: f64 = 30.0;
pub const FLOW_MAX: f64 = 20.0;
pub const MOMENTUM_MAX: f64 = 20.0;

/// Upper bound of [`score`]
pub const SCORE_MAX: f64 = LIQUIDITY_MAX + VOLUME_MAX + FLOW_MAX + MOMENTUM_MAX;

const DEPTH_MULTIPLIER: f64 = 6.0;
const FLOW_MULTIPLIER: f64 = 6.0;
const MOMENTUM_H1_WEIGHT: f64 = 1.2;
const MOMENTUM_H24_WEIGHT: f64 = 0.3;
const MOMENTUM_DIVISOR: f64 = 2.5;
const MOMENTUM_NEUTRAL: f64 = 10.0;

/// The four sub-scores of a pair, each already clamped
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub liquidity: f64,
    pub volume: f64,
    pub flow: f64,
    pub momentum: f64,
}

impl ScoreBreakdown {
    pub fn from_record(record: &RawPairRecord) -> Self {
        Self {
            liquidity: depth_score(record.liquidity_usd, LIQUIDITY_MAX),
            volume: depth_score(record.volume_h24_usd, VOLUME_MAX),
            flow: flow_score(record.txns_h1.buys, record.txns_h1.sells),
            momentum: momentum_score(record.price_change.h1, record.price_change.h24),
        }
    }

    /// Sum of the sub-scores, rounded to two decimals
    pub fn total(&self) -> f64 {
        round2(self.liquidity + self.volume + self.flow + self.momentum)
    }
}

/// Composite score of a pair in `[0, 100]`
pub fn score(record: &RawPairRecord) -> f64 {
    ScoreBreakdown::from_record(record).total()
}

fn depth_score(usd: f64, cap: f64) -> f64 {
    (sanitize(usd).max(1.0).log10() * DEPTH_MULTIPLIER).min(cap)
}

fn flow_score(buys: u64, sells: u64) -> f64 {
    let ratio = (buys as f64 + 1.0) / (sells as f64 + 1.0);
    (ratio * FLOW_MULTIPLIER).clamp(0.0, FLOW_MAX)
}

fn momentum_score(change_h1: f64, change_h24: f64) -> f64 {
    let weighted =
        sanitize(change_h1) * MOMENTUM_H1_WEIGHT + sanitize(change_h24) * MOMENTUM_H24_WEIGHT;
    (weighted / MOMENTUM_DIVISOR + MOMENTUM_NEUTRAL).clamp(0.0, MOMENTUM_MAX)
}

/// Non-finite upstream numbers count as missing
fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
