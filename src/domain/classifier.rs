//! Decision buckets for scored pairs.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::chain::ChainConfig;

/// Minimum score for TRADE
pub const TRADE_SCORE: f64 = 70.0;
/// Minimum score for WATCH
pub const WATCH_SCORE: f64 = 55.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Trade,
    Watch,
    Avoid,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Trade => "TRADE",
            Decision::Watch => "WATCH",
            Decision::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a scored pair against its chain's depth floors.
///
/// Liquidity or volume below the chain minimum is always AVOID; the score
/// only matters once both floors are met.
pub fn classify(score: f64, liquidity_usd: f64, volume_24h_usd: f64, config: &ChainConfig) -> Decision {
    if liquidity_usd < config.min_liquidity_usd || volume_24h_usd < config.min_volume_24h_usd {
        return Decision::Avoid;
    }
    if score >= TRADE_SCORE {
        Decision::Trade
    } else if score >= WATCH_SCORE {
        Decision::Watch
    } else {
        Decision::Avoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ChainConfig {
        ChainConfig::new("base", "https://basescan.org/token/{token}")
            .with_min_liquidity(35_000.0)
            .with_min_volume(80_000.0)
    }

    #[test]
    fn test_liquidity_floor_overrides_score() {
        let config = base_config();
        assert_eq!(classify(100.0, 1_000.0, 1_000_000.0, &config), Decision::Avoid);
    }

    #[test]
    fn test_volume_floor_overrides_score() {
        let config = base_config();
        assert_eq!(classify(100.0, 1_000_000.0, 79_999.99, &config), Decision::Avoid);
    }

    #[test]
    fn test_score_thresholds() {
        let config = base_config();
        let (liq, vol) = (35_000.0, 80_000.0);

        assert_eq!(classify(70.0, liq, vol, &config), Decision::Trade);
        assert_eq!(classify(93.84, liq, vol, &config), Decision::Trade);
        assert_eq!(classify(69.99, liq, vol, &config), Decision::Watch);
        assert_eq!(classify(55.0, liq, vol, &config), Decision::Watch);
        assert_eq!(classify(54.99, liq, vol, &config), Decision::Avoid);
        assert_eq!(classify(0.0, liq, vol, &config), Decision::Avoid);
    }

    #[test]
    fn test_floor_for_all_scores() {
        let config = base_config();
        for s in 0..=100 {
            assert_eq!(classify(s as f64, 1_000.0, 500_000.0, &config), Decision::Avoid);
        }
    }

    #[test]
    fn test_decision_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Decision::Trade).unwrap(), "\"TRADE\"");
        assert_eq!(serde_json::to_string(&Decision::Watch).unwrap(), "\"WATCH\"");
        assert_eq!(Decision::Avoid.to_string(), "AVOID");
    }
}
