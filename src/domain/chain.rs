//! Chain identifiers and per-chain scan tunables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder substituted with the base-token address in explorer templates
pub const TOKEN_PLACEHOLDER: &str = "{token}";

/// Blockchain identifier as reported by the pair search API (e.g. `base`, `bsc`, `solana`).
///
/// Always stored lowercase so lookups and comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Chain(String);

impl Chain {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match against a raw upstream chain id
    pub fn matches(&self, raw_chain_id: &str) -> bool {
        raw_chain_id.trim().eq_ignore_ascii_case(&self.0)
    }
}

impl From<String> for Chain {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for Chain {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<Chain> for String {
    fn from(chain: Chain) -> Self {
        chain.0
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static tunables for one chain, loaded once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub chain: Chain,
    /// Pairs below this pool depth are always AVOID
    pub min_liquidity_usd: f64,
    /// Pairs below this 24h volume are always AVOID
    pub min_volume_24h_usd: f64,
    /// Search terms, issued in order
    pub queries: Vec<String>,
    /// Token explorer URL containing [`TOKEN_PLACEHOLDER`]
    pub explorer_template: String,
}

impl ChainConfig {
    pub fn new(chain: impl Into<Chain>, explorer_template: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            min_liquidity_usd: 0.0,
            min_volume_24h_usd: 0.0,
            queries: Vec::new(),
            explorer_template: explorer_template.into(),
        }
    }

    pub fn with_min_liquidity(mut self, usd: f64) -> Self {
        self.min_liquidity_usd = usd;
        self
    }

    pub fn with_min_volume(mut self, usd: f64) -> Self {
        self.min_volume_24h_usd = usd;
        self
    }

    pub fn with_queries<I, S>(mut self, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queries = queries.into_iter().map(Into::into).collect();
        self
    }

    /// Explorer link for a base token; `None` when the address is absent or blank
    pub fn explorer_link(&self, token_address: Option<&str>) -> Option<String> {
        token_address
            .filter(|addr| !addr.is_empty())
            .map(|addr| self.explorer_template.replace(TOKEN_PLACEHOLDER, addr))
    }
}
