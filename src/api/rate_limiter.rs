use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, Semaphore};
use tokio::time;
use tracing::warn;

use crate::core::SearchError;

#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    pub max_requests: usize,
    pub window: Duration,
    pub max_in_flight: usize,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(10),
            max_in_flight: 2,
        }
    }
}

/// Sliding-window throttle in front of the search endpoint.
pub struct SearchRateLimiter {
    config: RateLimiterConfig,
    semaphore: Arc<Semaphore>,
    request_times: Mutex<VecDeque<Instant>>,
}

impl SearchRateLimiter {
    pub fn new(mut config: RateLimiterConfig) -> Self {
        config.max_requests = config.max_requests.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(config.max_in_flight.max(1))),
            request_times: Mutex::new(VecDeque::new()),
            config,
        }
    }

    pub async fn acquire(&self) -> Result<RateLimitPermit, SearchError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| SearchError::ThrottleClosed)?;

        loop {
            let mut times = self.request_times.lock().await;
            let now = Instant::now();
            Self::evict_expired(&mut times, now, self.config.window);

            if times.len() < self.config.max_requests {
                times.push_back(now);
                return Ok(RateLimitPermit {
                    _permit: permit,
                    start_time: now,
                });
            }

            let Some(&oldest) = times.front() else {
                continue;
            };
            let wait = (oldest + self.config.window).saturating_duration_since(now);
            warn!("⏳ Search rate limit reached, waiting {:?}", wait);
            drop(times);
            time::sleep(wait).await;
        }
    }

    fn evict_expired(times: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(&front) = times.front() {
            if now.duration_since(front) >= window {
                times.pop_front();
            } else {
                break;
            }
        }
    }

    pub async fn current_usage(&self) -> usize {
        let times = self.request_times.lock().await;
        let now = Instant::now();
        times
            .iter()
            .filter(|&&t| now.duration_since(t) < self.config.window)
            .count()
    }

    pub async fn available_capacity(&self) -> usize {
        let usage = self.current_usage().await;
        self.config.max_requests.saturating_sub(usage)
    }
}

pub struct RateLimitPermit {
    _permit: tokio::sync::OwnedSemaphorePermit,
    start_time: Instant,
}

impl RateLimitPermit {
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_acquire_records_usage() {
        let limiter = SearchRateLimiter::new(RateLimiterConfig {
            max_requests: 5,
            window: Duration::from_secs(1),
            max_in_flight: 2,
        });

        let permit = limiter.acquire().await;
        assert!(permit.is_ok());
        assert_eq!(limiter.current_usage().await, 1);
        assert_eq!(limiter.available_capacity().await, 4);
    }

    #[tokio::test]
    async fn test_waits_when_window_full() {
        let limiter = SearchRateLimiter::new(RateLimiterConfig {
            max_requests: 2,
            window: Duration::from_millis(200),
            max_in_flight: 4,
        });

        let start = Instant::now();
        for _ in 0..3 {
            let _permit = limiter.acquire().await.unwrap();
        }

        assert!(start.elapsed() >= Duration::from_millis(150));
        assert_eq!(limiter.current_usage().await, 1);
    }

    #[tokio::test]
    async fn test_fresh_limiter_has_full_capacity() {
        let limiter = SearchRateLimiter::new(RateLimiterConfig::default());
        assert_eq!(limiter.available_capacity().await, 10);
    }
}
