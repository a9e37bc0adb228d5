pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, MonitoringConfig, ProviderConfig, ScannerConfig};
pub use error::{ConfigError, SearchError};
