//! Shared JSON-over-HTTP client
//!
//! Wraps reqwest with request pacing, a User-Agent, and bounded retries with
//! exponential backoff for transport errors, 429 and 5xx responses.

use std::sync::Arc;
use std::time::Duration;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::ports::MarketDataError;
use super::rate_limit::RateLimiter;

const BASE_BACKOFF_MS: u64 = 500;
const MAX_JITTER_MS: u64 = 250;
const MAX_ERROR_BODY: usize = 200;

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts after the first
    pub max_retries: u32,
    pub rate_limit_rpm: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("pair-scout/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(20),
            max_retries: 2,
            rate_limit_rpm: 240,
        }
    }
}

/// Paced, retrying JSON fetcher. Cheap to clone; clones share the limiter.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    limiter: Arc<Mutex<RateLimiter>>,
    timeout: Duration,
    max_retries: u32,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, MarketDataError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| MarketDataError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            limiter: Arc::new(Mutex::new(RateLimiter::new(config.rate_limit_rpm))),
            timeout: config.timeout,
            max_retries: config.max_retries,
        })
    }

    /// GET `url` with query parameters and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let mut attempt = 0;
        loop {
            match self.get_once(url, query).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    let backoff = backoff_delay(attempt, &err);
                    tracing::warn!(
                        "GET {} failed ({}), retrying in {:?} (attempt {}/{})",
                        url, err, backoff, attempt + 1, self.max_retries
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        self.limiter.lock().await.wait_if_needed().await;

        let response = self.http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    MarketDataError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: String = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(MarketDataError::Status { status: status.as_u16(), body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MarketDataError::Http(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| MarketDataError::Parse(e.to_string()))
    }
}

/// 500ms, 1s, 2s, ... plus jitter; rate limiting starts at 2s
fn backoff_delay(attempt: u32, err: &MarketDataError) -> Duration {
    let base = match err {
        MarketDataError::RateLimited => 2_000,
        _ => BASE_BACKOFF_MS,
    };
    let jitter = rand::thread_rng().gen_range(0..=MAX_JITTER_MS);
    Duration::from_millis(base * 2u64.pow(attempt.min(6)) + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_default() {
        let config = HttpConfig::default();
        assert!(config.user_agent.starts_with("pair-scout/"));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_fetcher_creation() {
        let fetcher = HttpFetcher::new(&HttpConfig::default());
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_backoff_grows() {
        let err = MarketDataError::Http("reset".into());
        let first = backoff_delay(0, &err);
        let third = backoff_delay(2, &err);

        assert!(first >= Duration::from_millis(500));
        assert!(first <= Duration::from_millis(750));
        assert!(third >= Duration::from_millis(2_000));
    }

    #[test]
    fn test_backoff_rate_limited_is_longer() {
        let delay = backoff_delay(0, &MarketDataError::RateLimited);
        assert!(delay >= Duration::from_secs(2));
    }
}
