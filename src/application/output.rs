//! Report output: pretty JSON file and console summary.

use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

use crate::domain::Report;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write the report as pretty JSON, creating parent directories
pub fn write_report(report: &Report, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Console summary with the first `top` candidates of each chain
pub fn render_summary(report: &Report, top: usize) -> String {
    let mut out = String::new();
    let ctx = &report.market_context;

    if ctx.is_available() {
        let _ = writeln!(
            out,
            "Market: mcap={} | vol24={} | btc_dom={} | assets={}",
            fmt_usd(ctx.total_mcap_usd),
            fmt_usd(ctx.total_vol_usd),
            ctx.btc_dominance.map_or("n/a".to_string(), |d| format!("{:.2}%", d)),
            ctx.active_cryptos.map_or("n/a".to_string(), |n| n.to_string()),
        );
    } else {
        let _ = writeln!(out, "Market: snapshot unavailable");
    }

    for chain in &report.chains {
        let rows: Vec<_> = chain.candidates.iter().take(top).collect();
        let _ = write!(out, "\n[{}] top {}", chain.chain.as_str().to_uppercase(), rows.len());
        if chain.stats.failed_queries > 0 {
            let _ = write!(
                out,
                " ({}/{} queries failed)",
                chain.stats.failed_queries, chain.stats.queries
            );
        }
        out.push('\n');

        for (i, c) in rows.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} | {} | score={:.2} | liq=${:.0} | vol24=${:.0}",
                i + 1,
                c.label(),
                c.decision,
                c.score,
                c.liq_usd,
                c.vol24_usd
            );
        }
    }
    out
}

fn fmt_usd(value: Option<f64>) -> String {
    value.map_or("n/a".to_string(), |v| format!("${:.0}", v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Chain, ChainConfig, ChainReport, ChainScanStats, MarketContext, RawPairRecord,
        ScoredCandidate,
    };
    use tempfile::tempdir;

    fn sample_report() -> Report {
        let config = ChainConfig::new("base", "https://basescan.org/token/{token}")
            .with_min_liquidity(35_000.0)
            .with_min_volume(80_000.0);
        let candidates = (0..8)
            .map(|i| {
                let record = RawPairRecord::new("base", format!("0x{}", i))
                    .with_base_token(&format!("0xt{}", i), &format!("TKN{}", i), "Token")
                    .with_liquidity(200_000.0)
                    .with_volume(150_000.0)
                    .with_txns_h1(40, 10)
                    .with_price_change(5.0, 12.0);
                ScoredCandidate::evaluate(record, &config)
            })
            .collect();

        Report {
            generated_at: 1_700_000_000,
            market_context: MarketContext {
                total_mcap_usd: Some(2.4e12),
                btc_dominance: Some(54.3),
                ..MarketContext::unavailable(1_700_000_000)
            },
            chains: vec![
                ChainReport {
                    chain: Chain::new("base"),
                    candidates,
                    stats: ChainScanStats { queries: 5, failed_queries: 0, raw_matches: 8, unique_pairs: 8 },
                },
                ChainReport {
                    chain: Chain::new("bsc"),
                    candidates: Vec::new(),
                    stats: ChainScanStats { queries: 5, failed_queries: 2, raw_matches: 0, unique_pairs: 0 },
                },
            ],
        }
    }

    #[test]
    fn test_write_report_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trading").join("scan-output.json");

        write_report(&sample_report(), &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["generated_at"], 1_700_000_000i64);
        assert_eq!(written["results"]["base"].as_array().unwrap().len(), 8);
        assert_eq!(written["results"]["base"][0]["decision"], "TRADE");
        assert_eq!(written["scan_stats"]["bsc"]["failed_queries"], 2);
    }

    #[test]
    fn test_summary_lines() {
        let summary = render_summary(&sample_report(), 5);

        assert!(summary.contains("Market: mcap=$2400000000000"));
        assert!(summary.contains("btc_dom=54.30%"));
        assert!(summary.contains("[BASE] top 5"));
        assert!(summary.contains("1. TKN0 | TRADE | score=93.84 | liq=$200000 | vol24=$150000"));
        assert!(!summary.contains("6. "));
        assert!(summary.contains("[BSC] top 0 (2/5 queries failed)"));
    }

    #[test]
    fn test_summary_without_market() {
        let mut report = sample_report();
        report.market_context = MarketContext::unavailable(0);
        assert!(render_summary(&report, 1).starts_with("Market: snapshot unavailable"));
    }
}
