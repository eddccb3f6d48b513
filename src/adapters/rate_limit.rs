//! Request pacing for public market data APIs.

use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(60);

/// Fixed-window rate limiter with a minimum spacing between requests.
///
/// The spacing is derived from the per-minute budget so a burst of
/// concurrent searches is spread evenly over the window.
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum requests per minute
    rpm_limit: u32,
    /// Minimum gap between two requests
    min_interval: Duration,
    /// Timestamp of last request
    last_request: Option<Instant>,
    /// Requests made in current window
    requests_in_window: u32,
    /// Window start time
    window_start: Instant,
}

impl RateLimiter {
    pub fn new(rpm_limit: u32) -> Self {
        let rpm_limit = rpm_limit.max(1);
        Self {
            rpm_limit,
            min_interval: WINDOW / rpm_limit,
            last_request: None,
            requests_in_window: 0,
            window_start: Instant::now(),
        }
    }

    pub fn rpm_limit(&self) -> u32 {
        self.rpm_limit
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// How long to wait before the next request, if at all
    pub fn check_rate_limit(&mut self) -> Option<Duration> {
        self.check_at(Instant::now())
    }

    fn check_at(&mut self, now: Instant) -> Option<Duration> {
        let elapsed = now.duration_since(self.window_start);

        if elapsed >= WINDOW {
            self.window_start = now;
            self.requests_in_window = 0;
        } else if self.requests_in_window >= self.rpm_limit {
            return Some(WINDOW - elapsed);
        }

        let since_last = self.last_request.map(|t| now.duration_since(t))?;
        self.min_interval.checked_sub(since_last).filter(|d| !d.is_zero())
    }

    pub fn record_request(&mut self) {
        self.last_request = Some(Instant::now());
        self.requests_in_window += 1;
    }

    /// Sleep until a request is allowed, then record it
    pub async fn wait_if_needed(&mut self) {
        while let Some(wait) = self.check_rate_limit() {
            tracing::debug!("Rate limiter pausing for {:?}", wait);
            tokio::time::sleep(wait).await;
        }
        self.record_request();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_interval_from_rpm() {
        assert_eq!(RateLimiter::new(60).min_interval(), Duration::from_secs(1));
        assert_eq!(RateLimiter::new(300).min_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_zero_rpm_is_clamped() {
        let limiter = RateLimiter::new(0);
        assert_eq!(limiter.rpm_limit(), 1);
    }

    #[test]
    fn test_first_request_is_immediate() {
        let mut limiter = RateLimiter::new(60);
        assert!(limiter.check_rate_limit().is_none());
    }

    #[test]
    fn test_spacing_enforced_after_request() {
        let mut limiter = RateLimiter::new(60);
        limiter.record_request();

        let wait = limiter.check_rate_limit().unwrap();
        assert!(wait <= Duration::from_secs(1));
        assert!(wait > Duration::from_millis(500));
    }

    #[test]
    fn test_window_budget_exhausted() {
        let mut limiter = RateLimiter::new(3);
        for _ in 0..3 {
            limiter.record_request();
        }
        assert_eq!(limiter.requests_in_window, 3);

        let wait = limiter.check_rate_limit().unwrap();
        assert!(wait > Duration::from_secs(50));
    }

    #[test]
    fn test_window_resets() {
        let mut limiter = RateLimiter::new(2);
        limiter.record_request();
        limiter.record_request();

        let later = Instant::now() + WINDOW + Duration::from_secs(1);
        assert!(limiter.check_at(later).is_none());
        assert_eq!(limiter.requests_in_window, 0);
    }

    #[tokio::test]
    async fn test_wait_records_request() {
        let mut limiter = RateLimiter::new(6000);
        limiter.wait_if_needed().await;
        limiter.wait_if_needed().await;
        assert_eq!(limiter.requests_in_window, 2);
    }
}
