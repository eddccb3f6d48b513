//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config/scanner.toml.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::coingecko::DEFAULT_COINGECKO_URL;
use crate::adapters::dexscreener::DEFAULT_DEXSCREENER_URL;
use crate::adapters::http::HttpConfig;
use crate::domain::{Chain, ChainConfig, MAX_RESULTS_PER_CHAIN, TOKEN_PLACEHOLDER};

/// Main configuration structure matching config/scanner.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerSection,
    #[serde(default)]
    pub sources: SourcesSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
    /// Chains to scan, in report order
    #[serde(default)]
    pub chains: Vec<ChainSection>,
    /// Chain id -> token explorer URL template
    #[serde(default)]
    pub explorers: BTreeMap<String, String>,
}

/// Scan pipeline configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerSection {
    /// Candidates kept per chain (1-30)
    pub top_n: usize,
    /// Maximum gateway calls in flight
    pub max_concurrency: usize,
    /// Upper bound on one gateway call, retries included
    pub call_timeout_secs: u64,
}

impl Default for ScannerSection {
    fn default() -> Self {
        Self {
            top_n: MAX_RESULTS_PER_CHAIN,
            max_concurrency: 4,
            call_timeout_secs: 30,
        }
    }
}

/// Upstream API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesSection {
    pub dexscreener_url: String,
    pub coingecko_url: String,
    pub user_agent: String,
    /// Per-HTTP-request timeout
    pub request_timeout_secs: u64,
    /// Retries for transport errors, 429 and 5xx
    pub max_retries: u32,
    /// Request budget per API host
    pub rate_limit_rpm: u32,
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            dexscreener_url: DEFAULT_DEXSCREENER_URL.to_string(),
            coingecko_url: DEFAULT_COINGECKO_URL.to_string(),
            user_agent: HttpConfig::default().user_agent,
            request_timeout_secs: 20,
            max_retries: 2,
            rate_limit_rpm: 240,
        }
    }
}

impl SourcesSection {
    /// Get DexScreener URL with environment variable override
    /// Checks DEXSCREENER_API_URL env var first, falls back to config value
    pub fn get_dexscreener_url(&self) -> String {
        std::env::var("DEXSCREENER_API_URL").unwrap_or_else(|_| self.dexscreener_url.clone())
    }

    /// Get CoinGecko URL with environment variable override
    /// Checks COINGECKO_API_URL env var first, falls back to config value
    pub fn get_coingecko_url(&self) -> String {
        std::env::var("COINGECKO_API_URL").unwrap_or_else(|_| self.coingecko_url.clone())
    }
}

/// Report output configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// JSON report path (`~` is expanded)
    pub path: String,
    /// Rows per chain printed to the console
    pub console_top: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: "trading/scan-output.json".to_string(),
            console_top: 5,
        }
    }
}

impl OutputSection {
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).into_owned())
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

/// One `[[chains]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct ChainSection {
    pub id: String,
    pub min_liquidity_usd: f64,
    pub min_volume_24h_usd: f64,
    pub queries: Vec<String>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::ValidationError(msg)
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate scanner section
        if self.scanner.top_n == 0 || self.scanner.top_n > MAX_RESULTS_PER_CHAIN {
            return Err(invalid(format!(
                "scanner.top_n must be 1-{}, got {}",
                MAX_RESULTS_PER_CHAIN, self.scanner.top_n
            )));
        }

        if self.scanner.max_concurrency == 0 {
            return Err(invalid("scanner.max_concurrency must be > 0".to_string()));
        }

        if self.scanner.call_timeout_secs == 0 {
            return Err(invalid("scanner.call_timeout_secs must be > 0".to_string()));
        }

        // Validate sources
        if self.sources.dexscreener_url.trim().is_empty() {
            return Err(invalid("sources.dexscreener_url cannot be empty".to_string()));
        }

        if self.sources.coingecko_url.trim().is_empty() {
            return Err(invalid("sources.coingecko_url cannot be empty".to_string()));
        }

        if self.sources.request_timeout_secs == 0 {
            return Err(invalid("sources.request_timeout_secs must be > 0".to_string()));
        }

        if self.sources.rate_limit_rpm == 0 {
            return Err(invalid("sources.rate_limit_rpm must be > 0".to_string()));
        }

        // Validate chains
        if self.chains.is_empty() {
            return Err(invalid("at least one [[chains]] entry is required".to_string()));
        }

        for (i, chain) in self.chains.iter().enumerate() {
            if chain.id.trim().is_empty() {
                return Err(invalid(format!("chains[{}].id cannot be empty", i)));
            }

            let id = Chain::new(&chain.id);
            if self.chains[..i].iter().any(|c| Chain::new(&c.id) == id) {
                return Err(invalid(format!("chains[{}].id '{}' is duplicated", i, id)));
            }

            for (field, value) in [
                ("min_liquidity_usd", chain.min_liquidity_usd),
                ("min_volume_24h_usd", chain.min_volume_24h_usd),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(invalid(format!(
                        "chains[{}].{} must be >= 0, got {}",
                        i, field, value
                    )));
                }
            }

            if chain.queries.is_empty() {
                return Err(invalid(format!("chains[{}].queries cannot be empty", i)));
            }

            if let Some(q) = chain.queries.iter().position(|q| q.trim().is_empty()) {
                return Err(invalid(format!("chains[{}].queries[{}] cannot be blank", i, q)));
            }
        }

        // Validate explorers
        for (key, template) in &self.explorers {
            let chain = Chain::new(key);
            if !self.chains.iter().any(|c| Chain::new(&c.id) == chain) {
                return Err(invalid(format!(
                    "explorers.{} references unknown chain '{}'",
                    key, chain
                )));
            }

            if !template.contains(TOKEN_PLACEHOLDER) {
                return Err(invalid(format!(
                    "explorers.{} must contain the {} placeholder",
                    key, TOKEN_PLACEHOLDER
                )));
            }
        }

        self.chain_configs().map(|_| ())
    }

    /// Per-chain tunables in configuration order
    pub fn chain_configs(&self) -> Result<Vec<ChainConfig>, ConfigError> {
        self.chains
            .iter()
            .map(|section| {
                let chain = Chain::new(&section.id);
                let template = self.explorer_for(&chain).ok_or_else(|| {
                    invalid(format!("explorers.{} is missing for configured chain", chain))
                })?;

                Ok(ChainConfig::new(chain, template)
                    .with_min_liquidity(section.min_liquidity_usd)
                    .with_min_volume(section.min_volume_24h_usd)
                    .with_queries(section.queries.iter().map(|q| q.trim())))
            })
            .collect()
    }

    /// Look up a configured chain by id (case-insensitive)
    pub fn chain_config(&self, id: &str) -> Result<ChainConfig, ConfigError> {
        let wanted = Chain::new(id);
        self.chain_configs()?
            .into_iter()
            .find(|c| c.chain == wanted)
            .ok_or_else(|| invalid(format!("unknown chain '{}'", wanted)))
    }

    fn explorer_for(&self, chain: &Chain) -> Option<&str> {
        self.explorers
            .iter()
            .find(|(key, _)| Chain::new(key.as_str()) == *chain)
            .map(|(_, template)| template.as_str())
    }
}

// Conversion from SourcesSection to HttpConfig
impl From<&SourcesSection> for HttpConfig {
    fn from(sources: &SourcesSection) -> Self {
        HttpConfig {
            user_agent: sources.user_agent.clone(),
            timeout: Duration::from_secs(sources.request_timeout_secs),
            max_retries: sources.max_retries,
            rate_limit_rpm: sources.rate_limit_rpm,
        }
    }
}

// Conversion from Config to ScanSettings
impl From<&Config> for crate::application::ScanSettings {
    fn from(config: &Config) -> Self {
        crate::application::ScanSettings {
            top_n: config.scanner.top_n,
            max_concurrency: config.scanner.max_concurrency,
            call_timeout: Duration::from_secs(config.scanner.call_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CHAINS: &str = r#"
[[chains]]
id = "base"
min_liquidity_usd = 35000
min_volume_24h_usd = 80000
queries = ["base", "brett", "toshi", "degen", "meme"]

[[chains]]
id = "bsc"
min_liquidity_usd = 50000
min_volume_24h_usd = 120000
queries = ["bsc", "bnb", "meme", "ai", "doge"]

[[chains]]
id = "solana"
min_liquidity_usd = 40000
min_volume_24h_usd = 100000
queries = ["sol", "solana", "bonk", "wif", "meme"]
"#;

    const EXPLORERS: &str = r#"
[explorers]
base = "https://basescan.org/token/{token}"
bsc = "https://bscscan.com/token/{token}"
solana = "https://solscan.io/token/{token}"
"#;

    fn create_valid_config() -> String {
        format!(
            r#"
[scanner]
top_n = 30
max_concurrency = 6
call_timeout_secs = 25

[sources]
dexscreener_url = "https://api.dexscreener.com"
coingecko_url = "https://api.coingecko.com/api/v3"
user_agent = "pair-scout-test/1.0"
request_timeout_secs = 20
max_retries = 2
rate_limit_rpm = 240

[output]
path = "trading/scan-output.json"
console_top = 5

[logging]
level = "info"
{}{}"#,
            CHAINS, EXPLORERS
        )
    }

    fn assert_validation_error(content: &str, needle: &str) {
        match parse_config(content) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains(needle), "'{}' does not mention '{}'", msg, needle)
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(create_valid_config().as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scanner.top_n, 30);
        assert_eq!(config.scanner.max_concurrency, 6);
        assert_eq!(config.sources.user_agent, "pair-scout-test/1.0");
        assert_eq!(config.chains.len(), 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/scanner.toml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let result = parse_config("[[chains]\nid = ");
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_sections_default_when_omitted() {
        let config = parse_config(&format!("{}{}", CHAINS, EXPLORERS)).unwrap();

        assert_eq!(config.scanner.top_n, MAX_RESULTS_PER_CHAIN);
        assert_eq!(config.scanner.max_concurrency, 4);
        assert_eq!(config.sources.dexscreener_url, DEFAULT_DEXSCREENER_URL);
        assert_eq!(config.output.console_top, 5);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_chain_configs_in_order() {
        let config = parse_config(&create_valid_config()).unwrap();
        let chains = config.chain_configs().unwrap();

        let ids: Vec<_> = chains.iter().map(|c| c.chain.as_str()).collect();
        assert_eq!(ids, vec!["base", "bsc", "solana"]);

        let bsc = &chains[1];
        assert_eq!(bsc.min_liquidity_usd, 50_000.0);
        assert_eq!(bsc.min_volume_24h_usd, 120_000.0);
        assert_eq!(bsc.queries, vec!["bsc", "bnb", "meme", "ai", "doge"]);
        assert_eq!(bsc.explorer_template, "https://bscscan.com/token/{token}");
    }

    #[test]
    fn test_chain_config_lookup() {
        let config = parse_config(&create_valid_config()).unwrap();

        assert_eq!(config.chain_config("SOLANA").unwrap().min_liquidity_usd, 40_000.0);
        assert!(matches!(
            config.chain_config("arbitrum"),
            Err(ConfigError::ValidationError(msg)) if msg.contains("arbitrum")
        ));
    }

    #[test]
    fn test_missing_explorer() {
        let explorers = EXPLORERS.replace("bsc = \"https://bscscan.com/token/{token}\"\n", "");
        assert_validation_error(&format!("{}{}", CHAINS, explorers), "explorers.bsc");
    }

    #[test]
    fn test_explorer_for_unknown_chain() {
        let content = format!(
            "{}{}arbitrum = \"https://arbiscan.io/token/{{token}}\"\n",
            CHAINS, EXPLORERS
        );
        assert_validation_error(&content, "unknown chain 'arbitrum'");
    }

    #[test]
    fn test_explorer_without_placeholder() {
        let explorers = EXPLORERS.replace("https://solscan.io/token/{token}", "https://solscan.io/token/");
        assert_validation_error(&format!("{}{}", CHAINS, explorers), "explorers.solana");
    }

    #[test]
    fn test_no_chains() {
        assert_validation_error("[scanner]\ntop_n = 10\n", "[[chains]]");
    }

    #[test]
    fn test_duplicate_chain() {
        let content = format!(
            "{}\n[[chains]]\nid = \"BASE\"\nmin_liquidity_usd = 1\nmin_volume_24h_usd = 1\nqueries = [\"x\"]\n{}",
            CHAINS, EXPLORERS
        );
        assert_validation_error(&content, "chains[3].id");
    }

    #[test]
    fn test_empty_queries() {
        let chains = CHAINS.replace(r#"queries = ["bsc", "bnb", "meme", "ai", "doge"]"#, "queries = []");
        assert_validation_error(&format!("{}{}", chains, EXPLORERS), "chains[1].queries");

        let chains = CHAINS.replace(r#""bonk""#, r#""  ""#);
        assert_validation_error(&format!("{}{}", chains, EXPLORERS), "chains[2].queries[2]");
    }

    #[test]
    fn test_negative_minimum() {
        let chains = CHAINS.replace("min_liquidity_usd = 35000", "min_liquidity_usd = -5");
        assert_validation_error(&format!("{}{}", chains, EXPLORERS), "chains[0].min_liquidity_usd");
    }

    #[test]
    fn test_invalid_top_n() {
        let content = create_valid_config().replace("top_n = 30", "top_n = 31");
        assert_validation_error(&content, "scanner.top_n");

        let content = create_valid_config().replace("top_n = 30", "top_n = 0");
        assert_validation_error(&content, "scanner.top_n");
    }

    #[test]
    fn test_invalid_concurrency_and_rate() {
        let content = create_valid_config().replace("max_concurrency = 6", "max_concurrency = 0");
        assert_validation_error(&content, "scanner.max_concurrency");

        let content = create_valid_config().replace("rate_limit_rpm = 240", "rate_limit_rpm = 0");
        assert_validation_error(&content, "sources.rate_limit_rpm");
    }

    #[test]
    fn test_output_path_expansion() {
        let output = OutputSection { path: "reports/out.json".to_string(), console_top: 3 };
        assert_eq!(output.resolved_path(), PathBuf::from("reports/out.json"));
    }

    #[test]
    fn test_sources_to_http_config() {
        let config = parse_config(&create_valid_config()).unwrap();
        let http = HttpConfig::from(&config.sources);

        assert_eq!(http.user_agent, "pair-scout-test/1.0");
        assert_eq!(http.timeout, Duration::from_secs(20));
        assert_eq!(http.max_retries, 2);
        assert_eq!(http.rate_limit_rpm, 240);
    }

    #[test]
    fn test_config_to_scan_settings() {
        let config = parse_config(&create_valid_config()).unwrap();
        let settings = crate::application::ScanSettings::from(&config);

        assert_eq!(settings.top_n, 30);
        assert_eq!(settings.max_concurrency, 6);
        assert_eq!(settings.call_timeout, Duration::from_secs(25));
    }
}
