use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use super::exclusions::ExclusionSet;
use super::metrics::ScanMetrics;
use super::outliers::{median, remove_outliers};
use super::price_extractor::PriceExtractor;
use super::source::{domain_label, source_name};
use crate::api::{SearchProvider, SearchResult};
use crate::core::{ConfigError, ScannerConfig};

/// Robust price estimate for one query. Only produced when at least one
/// sample survived, so `min <= avg <= max` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    pub min: u64,
    pub max: u64,
    /// Median of the trimmed samples.
    pub avg: u64,
    pub sources: Vec<String>,
    pub sample_count: usize,
    pub scanned_at: DateTime<Utc>,
}

/// Backoff hook so tests can retry without real delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Default)]
struct SiteOutcome {
    prices: Vec<u64>,
    sources: Vec<String>,
}

pub struct MarketScanner {
    provider: Arc<dyn SearchProvider>,
    sleeper: Arc<dyn Sleeper>,
    extractor: PriceExtractor,
    config: ScannerConfig,
    metrics: Arc<ScanMetrics>,
}

impl MarketScanner {
    pub fn new(provider: Arc<dyn SearchProvider>, config: ScannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            provider,
            sleeper: Arc::new(TokioSleeper),
            extractor: PriceExtractor::new(config.price_bounds),
            config,
            metrics: Arc::new(ScanMetrics::new()),
        })
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn metrics(&self) -> Arc<ScanMetrics> {
        self.metrics.clone()
    }

    /// Searches every trusted site for `query` and reduces the prices found to
    /// summary statistics. `None` means no site produced a usable price; search
    /// failures never surface as errors.
    ///
    /// Sites are merged in site-list order even when scanned concurrently. On
    /// timeout, every site that already finished still counts.
    pub async fn scan(&self, query: &str, exclusions: &ExclusionSet) -> Option<MarketStats> {
        self.metrics.increment_scans();
        tracing::info!(
            "🔍 Scanning {} sites for {:?} ({} exclusions)",
            self.config.trusted_sites.len(),
            query,
            exclusions.len()
        );

        let sites = &self.config.trusted_sites;
        let mut outcomes: Vec<Option<SiteOutcome>> = sites.iter().map(|_| None).collect();
        let collect = async {
            let mut per_site = stream::iter(sites.iter().enumerate())
                .map(|(index, site)| async move {
                    (index, self.scan_site(query, exclusions, site).await)
                })
                .buffer_unordered(self.config.concurrency);

            while let Some((index, outcome)) = per_site.next().await {
                outcomes[index] = Some(outcome);
            }
        };

        if tokio::time::timeout(self.config.scan_timeout(), collect)
            .await
            .is_err()
        {
            tracing::warn!(
                "⏱️ Market scan for {:?} timed out after {:?}; using {} of {} sites",
                query,
                self.config.scan_timeout(),
                outcomes.iter().filter(|o| o.is_some()).count(),
                sites.len()
            );
        }

        let mut prices = Vec::new();
        let mut sources = Vec::new();
        let mut seen = HashSet::new();
        for outcome in outcomes.into_iter().flatten() {
            prices.extend(outcome.prices);
            for source in outcome.sources {
                if seen.insert(source.clone()) {
                    sources.push(source);
                }
            }
        }

        let stats = self.summarize(&prices, sources);
        match &stats {
            Some(stats) => tracing::info!(
                "✅ Market price for {:?}: ₹{} (min ₹{}, max ₹{}, {} samples)",
                query,
                stats.avg,
                stats.min,
                stats.max,
                stats.sample_count
            ),
            None => {
                self.metrics.increment_empty_scans();
                tracing::warn!("⚠️ No market data found for {:?}", query);
            }
        }
        stats
    }

    /// `<query> -<kw>... site:<domain>`
    pub fn build_query(&self, query: &str, exclusions: &ExclusionSet, site: &str) -> String {
        let mut parts = vec![query.trim().to_string()];
        parts.extend(exclusions.negated_terms());
        parts.push(format!("site:{site}"));
        parts.join(" ")
    }

    async fn scan_site(&self, query: &str, exclusions: &ExclusionSet, site: &str) -> SiteOutcome {
        let site_query = self.build_query(query, exclusions, site);
        let Some(results) = self.search_with_retry(&site_query, site).await else {
            return SiteOutcome::default();
        };

        let mut outcome = SiteOutcome::default();
        for result in results {
            if exclusions.matches(&result.title) {
                self.metrics.increment_results_excluded();
                tracing::debug!("Discarding excluded result from {}: {:?}", site, result.title);
                continue;
            }

            let found = self.extractor.extract(&result.text());
            if found.is_empty() {
                continue;
            }

            self.metrics.add_samples(found.len());
            outcome.prices.extend(found);

            if let Some(source) = Self::attribute(&result, site) {
                if !outcome.sources.contains(&source) {
                    outcome.sources.push(source);
                }
            }
        }

        tracing::debug!(
            "{}: {} price samples from {} sources",
            site,
            outcome.prices.len(),
            outcome.sources.len()
        );
        outcome
    }

    async fn search_with_retry(&self, site_query: &str, site: &str) -> Option<Vec<SearchResult>> {
        let attempts = self.config.retry_attempts;

        for attempt in 1..=attempts {
            self.metrics.increment_search_attempts();

            match self
                .provider
                .search(site_query, &self.config.region, self.config.max_results_per_site)
                .await
            {
                Ok(mut results) => {
                    results.truncate(self.config.max_results_per_site);
                    return Some(results);
                }
                Err(e) => {
                    self.metrics.increment_search_failures();
                    if e.is_rate_limited() {
                        self.metrics.increment_rate_limited();
                        tracing::warn!(
                            "🚦 Search provider rate limited {} (attempt {}/{})",
                            site,
                            attempt,
                            attempts
                        );
                    }
                    if attempt < attempts {
                        tracing::debug!(
                            "Search on {} failed (attempt {}/{}): {}; retrying in {:?}",
                            site,
                            attempt,
                            attempts,
                            e,
                            self.config.retry_backoff()
                        );
                        self.sleeper.sleep(self.config.retry_backoff()).await;
                    } else {
                        tracing::warn!(
                            "Giving up on {} after {} attempts: {}",
                            site,
                            attempts,
                            e
                        );
                    }
                }
            }
        }

        self.metrics.increment_sites_exhausted();
        None
    }

    /// Retailer name from the result URL, or from the scanned domain when the
    /// URL is unusable.
    fn attribute(result: &SearchResult, site: &str) -> Option<String> {
        source_name(&result.url).or_else(|| domain_label(site))
    }

    fn summarize(&self, prices: &[u64], mut sources: Vec<String>) -> Option<MarketStats> {
        if prices.is_empty() {
            return None;
        }

        let mut kept = remove_outliers(prices, &self.config.outliers);
        kept.sort_unstable();

        let min = *kept.first()?;
        let max = *kept.last()?;
        let avg = median(&kept)?;

        tracing::debug!(
            "Outlier removal kept {} of {} samples",
            kept.len(),
            prices.len()
        );

        sources.truncate(self.config.source_cap);

        Some(MarketStats {
            min,
            max,
            avg,
            sources,
            sample_count: kept.len(),
            scanned_at: Utc::now(),
        })
    }
}
