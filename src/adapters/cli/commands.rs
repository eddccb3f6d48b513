//! CLI Command Handlers
//!
//! Implementation of all CLI commands for the pair scanner.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use crate::adapters::HttpMarketGateway;
use crate::application::{render_summary, write_report, ReportBuilder, ScanSettings};
use crate::config::{load_config, Config};

const DEFAULT_CONFIG: &str = "config/scanner.toml";

/// Pair Scout - multi-chain DEX pair scanner
#[derive(Parser, Debug)]
#[command(
    name = "pair-scout",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Multi-chain DEX pair scanner",
    long_about = "Pair Scout searches DexScreener for configured queries on each chain, \
                  scores every matching pair on liquidity, volume, order flow and momentum, \
                  and writes a ranked TRADE / WATCH / AVOID report."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan every configured chain and write the report
    Scan(ScanCmd),

    /// Run a single query against one chain
    Search(SearchCmd),

    /// Validate the configuration file
    Validate(ValidateCmd),
}

impl Command {
    pub fn config_path(&self) -> &Path {
        match self {
            Command::Scan(cmd) => &cmd.config,
            Command::Search(cmd) => &cmd.config,
            Command::Validate(cmd) => &cmd.config,
        }
    }
}

/// Build the full report
#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Override the report output path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Candidates to print per chain
    #[arg(short, long, value_name = "N")]
    pub top: Option<usize>,

    /// Print the summary without writing the report file
    #[arg(long)]
    pub no_write: bool,
}

/// Run one query through the scoring pipeline
#[derive(Parser, Debug)]
pub struct SearchCmd {
    /// Chain id (e.g., base)
    #[arg(value_name = "CHAIN")]
    pub chain: String,

    /// Search query (e.g., WETH)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Load and validate configuration
#[derive(Parser, Debug)]
pub struct ValidateCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Execute the parsed command
pub async fn execute(app: CliApp) -> Result<()> {
    let config_path = app.command.config_path().to_path_buf();
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    init_logging(app.verbose, app.debug, &config.logging.level)?;
    tracing::debug!("Loaded configuration from {}", config_path.display());

    match app.command {
        Command::Scan(cmd) => scan_command(cmd, config).await,
        Command::Search(cmd) => search_command(cmd, config).await,
        Command::Validate(_) => validate_command(&config_path, &config),
    }
}

fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_new(configured)
            .with_context(|| format!("Invalid logging.level '{}'", configured))?
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}

fn build_gateway(config: &Config) -> Result<Arc<HttpMarketGateway>> {
    let gateway = HttpMarketGateway::from_sources(&config.sources)
        .context("Failed to create HTTP clients")?;
    Ok(Arc::new(gateway))
}

async fn scan_command(cmd: ScanCmd, config: Config) -> Result<()> {
    let chains = config.chain_configs()?;
    let settings = ScanSettings::from(&config);
    let builder = ReportBuilder::new(build_gateway(&config)?, chains, settings);

    let report = builder.build().await;

    if report.failed_queries() > 0 {
        tracing::warn!("{} queries failed during scan", report.failed_queries());
    }

    if !cmd.no_write {
        let path = cmd.output.unwrap_or_else(|| config.output.resolved_path());
        write_report(&report, &path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    let top = cmd.top.unwrap_or(config.output.console_top);
    print!("{}", render_summary(&report, top));
    Ok(())
}

async fn search_command(cmd: SearchCmd, config: Config) -> Result<()> {
    let chain = config.chain_config(&cmd.chain)?;
    let builder = ReportBuilder::new(
        build_gateway(&config)?,
        vec![chain.clone()],
        ScanSettings::from(&config),
    );

    let candidates = builder
        .search_chain(&chain, &cmd.query)
        .await
        .with_context(|| format!("Search '{}' on {} failed", cmd.query, chain.chain))?;

    println!("[{}] '{}': {} pairs", chain.chain, cmd.query, candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        let b = &c.breakdown;
        println!(
            "{}. {} | {} | score={:.2} (liq={:.2} vol={:.2} flow={:.2} mom={:.2}) | {}",
            i + 1,
            c.label(),
            c.decision,
            c.score,
            b.liquidity,
            b.volume,
            b.flow,
            b.momentum,
            c.pair_url.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn validate_command(path: &Path, config: &Config) -> Result<()> {
    let chains = config.chain_configs()?;

    println!("Configuration OK: {}", path.display());
    println!(
        "top_n={} max_concurrency={} call_timeout={}s",
        config.scanner.top_n, config.scanner.max_concurrency, config.scanner.call_timeout_secs
    );
    println!("{:<10} {:>14} {:>14}  queries", "chain", "min_liq", "min_vol24");
    for chain in &chains {
        println!(
            "{:<10} {:>14.0} {:>14.0}  {}",
            chain.chain.as_str(),
            chain.min_liquidity_usd,
            chain.min_volume_24h_usd,
            chain.queries.join(", ")
        );
    }
    Ok(())
}
