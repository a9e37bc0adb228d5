pub mod duckduckgo;
pub mod rate_limiter;
pub mod search;
pub mod types;

pub use duckduckgo::DuckDuckGoClient;
pub use rate_limiter::{RateLimiterConfig, SearchRateLimiter};
pub use search::SearchProvider;
pub use types::*;

#[cfg(test)]
pub use search::MockSearchProvider;
