use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::error::ConfigError;
use crate::scanner::outliers::OutlierConfig;
use crate::scanner::price_extractor::PriceBounds;

const DEFAULT_TRUSTED_SITES: &[&str] = &[
    "amazon.in",
    "flipkart.com",
    "myntra.com",
    "ajio.com",
    "meesho.com",
    "snapdeal.com",
    "tatacliq.com",
    "nykaa.com",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub provider: ProviderConfig,
    pub monitoring: MonitoringConfig,
}

/// Everything one market scan needs. Read once, never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Scanned in this order; also the order sources are reported in.
    pub trusted_sites: Vec<String>,
    pub region: String,
    pub max_results_per_site: usize,
    pub price_bounds: PriceBounds,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
    pub source_cap: usize,
    pub concurrency: usize,
    pub scan_timeout_secs: u64,
    pub outliers: OutlierConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub requests_per_window: usize,
    pub window_secs: u64,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            trusted_sites: DEFAULT_TRUSTED_SITES.iter().map(|s| s.to_string()).collect(),
            region: "in-en".to_string(),
            max_results_per_site: 5,
            price_bounds: PriceBounds::default(),
            retry_attempts: 3,
            retry_backoff_ms: 1500,
            source_cap: 5,
            concurrency: 1,
            scan_timeout_secs: 60,
            outliers: OutlierConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 10,
            window_secs: 10,
            http_timeout_secs: 10,
        }
    }
}

impl ScannerConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trusted_sites.is_empty() {
            return Err(ConfigError::NoTrustedSites);
        }
        if let Some(bad) = self
            .trusted_sites
            .iter()
            .find(|s| s.is_empty() || s.contains(char::is_whitespace) || s.contains('/'))
        {
            return Err(ConfigError::InvalidSite(bad.clone()));
        }
        if self.price_bounds.min >= self.price_bounds.max {
            return Err(ConfigError::InvalidPriceBounds {
                min: self.price_bounds.min,
                max: self.price_bounds.max,
            });
        }
        if self.max_results_per_site == 0 {
            return Err(ConfigError::ZeroValue("max_results_per_site"));
        }
        if self.retry_attempts == 0 {
            return Err(ConfigError::ZeroValue("retry_attempts"));
        }
        if self.source_cap == 0 {
            return Err(ConfigError::ZeroValue("source_cap"));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroValue("concurrency"));
        }
        if self.scan_timeout_secs == 0 {
            return Err(ConfigError::ZeroValue("scan_timeout_secs"));
        }
        Ok(())
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.requests_per_window == 0 {
            return Err(ConfigError::ZeroValue("requests_per_window"));
        }
        if self.window_secs == 0 {
            return Err(ConfigError::ZeroValue("window_secs"));
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::ZeroValue("http_timeout_secs"));
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let scanner_defaults = ScannerConfig::default();
        let provider_defaults = ProviderConfig::default();

        let trusted_sites = match env::var("SCOUT_TRUSTED_SITES") {
            Ok(raw) => parse_site_list(&raw),
            Err(_) => scanner_defaults.trusted_sites.clone(),
        };

        let config = Config {
            scanner: ScannerConfig {
                trusted_sites,
                region: env::var("SCOUT_REGION").unwrap_or(scanner_defaults.region),
                max_results_per_site: env_or(
                    "SCOUT_MAX_RESULTS",
                    scanner_defaults.max_results_per_site,
                )?,
                price_bounds: PriceBounds {
                    min: env_or("SCOUT_MIN_PRICE", scanner_defaults.price_bounds.min)?,
                    max: env_or("SCOUT_MAX_PRICE", scanner_defaults.price_bounds.max)?,
                },
                retry_attempts: env_or("SCOUT_RETRY_ATTEMPTS", scanner_defaults.retry_attempts)?,
                retry_backoff_ms: env_or(
                    "SCOUT_RETRY_BACKOFF_MS",
                    scanner_defaults.retry_backoff_ms,
                )?,
                source_cap: env_or("SCOUT_SOURCE_CAP", scanner_defaults.source_cap)?,
                concurrency: env_or("SCOUT_CONCURRENCY", scanner_defaults.concurrency)?,
                scan_timeout_secs: env_or(
                    "SCOUT_SCAN_TIMEOUT_SECS",
                    scanner_defaults.scan_timeout_secs,
                )?,
                outliers: scanner_defaults.outliers,
            },
            provider: ProviderConfig {
                requests_per_window: env_or(
                    "SCOUT_REQUESTS_PER_WINDOW",
                    provider_defaults.requests_per_window,
                )?,
                window_secs: env_or("SCOUT_WINDOW_SECS", provider_defaults.window_secs)?,
                http_timeout_secs: env_or(
                    "SCOUT_HTTP_TIMEOUT_SECS",
                    provider_defaults.http_timeout_secs,
                )?,
            },
            monitoring: MonitoringConfig {
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scanner.validate()?;
        self.provider.validate()
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

fn parse_site_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scanner_config_is_valid() {
        let config = ScannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trusted_sites[0], "amazon.in");
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_backoff(), Duration::from_millis(1500));
    }

    #[test]
    fn test_empty_site_list_rejected() {
        let config = ScannerConfig {
            trusted_sites: vec![],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoTrustedSites)));
    }

    #[test]
    fn test_inverted_price_bounds_rejected() {
        let config = ScannerConfig {
            price_bounds: PriceBounds { min: 1000, max: 1000 },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPriceBounds { min: 1000, max: 1000 })
        ));
    }

    #[test]
    fn test_zero_retry_budget_rejected() {
        let config = ScannerConfig {
            retry_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroValue("retry_attempts"))
        ));
    }

    #[test]
    fn test_site_with_path_rejected() {
        let config = ScannerConfig {
            trusted_sites: vec!["amazon.in/deals".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSite(_))));
    }

    #[test]
    fn test_site_list_parsing() {
        let sites = parse_site_list(" Amazon.in, ,flipkart.com ,");
        assert_eq!(sites, vec!["amazon.in", "flipkart.com"]);
    }
}
