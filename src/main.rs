//! Pair Scout - multi-chain DEX pair scanner
//!
//! Searches DexScreener per chain, scores and classifies every pair, and
//! writes a ranked report.

use anyhow::Result;
use clap::Parser;

use pair_scout::adapters::cli::{self, CliApp};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (API URL overrides go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    cli::execute(app).await
}
