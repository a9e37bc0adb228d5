use thiserror::Error;

/// Invalid configuration. Raised once at startup, never per scan.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("trusted site list is empty")]
    NoTrustedSites,

    #[error("trusted site entry {0:?} is not a bare domain")]
    InvalidSite(String),

    #[error("invalid price bounds: min {min} must be below max {max}")]
    InvalidPriceBounds { min: u64, max: u64 },

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },
}

/// Failure talking to the search provider. Every variant is retryable.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search provider returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed search response: {0}")]
    Parse(String),

    #[error("search throttle closed")]
    ThrottleClosed,
}

impl SearchError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SearchError::Status { status: 429 })
    }
}
