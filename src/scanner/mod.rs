pub mod exclusions;
pub mod fallback;
pub mod market_scanner;
pub mod metrics;
pub mod outliers;
pub mod price_extractor;
pub mod source;

pub use exclusions::ExclusionSet;
pub use fallback::FallbackPriceModel;
pub use market_scanner::{MarketScanner, MarketStats, Sleeper, TokioSleeper};
pub use metrics::ScanMetrics;
pub use outliers::{remove_outliers, OutlierConfig};
pub use price_extractor::{PriceBounds, PriceExtractor};
