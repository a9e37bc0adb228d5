use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Counters shared by every scan a [`super::MarketScanner`] runs.
#[derive(Debug)]
pub struct ScanMetrics {
    scans: AtomicU64,
    empty_scans: AtomicU64,
    search_attempts: AtomicU64,
    search_failures: AtomicU64,
    rate_limited: AtomicU64,
    sites_exhausted: AtomicU64,
    results_excluded: AtomicU64,
    samples_extracted: AtomicU64,
    start_time: Instant,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self {
            scans: AtomicU64::new(0),
            empty_scans: AtomicU64::new(0),
            search_attempts: AtomicU64::new(0),
            search_failures: AtomicU64::new(0),
            rate_limited: AtomicU64::new(0),
            sites_exhausted: AtomicU64::new(0),
            results_excluded: AtomicU64::new(0),
            samples_extracted: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn increment_scans(&self) {
        self.scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_empty_scans(&self) {
        self.empty_scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_search_attempts(&self) {
        self.search_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_search_failures(&self) {
        self.search_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rate_limited(&self) {
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_sites_exhausted(&self) {
        self.sites_exhausted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_results_excluded(&self) {
        self.results_excluded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_samples(&self, count: usize) {
        self.samples_extracted
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn get_scans(&self) -> u64 {
        self.scans.load(Ordering::Relaxed)
    }

    pub fn get_empty_scans(&self) -> u64 {
        self.empty_scans.load(Ordering::Relaxed)
    }

    pub fn get_search_attempts(&self) -> u64 {
        self.search_attempts.load(Ordering::Relaxed)
    }

    pub fn get_search_failures(&self) -> u64 {
        self.search_failures.load(Ordering::Relaxed)
    }

    pub fn get_rate_limited(&self) -> u64 {
        self.rate_limited.load(Ordering::Relaxed)
    }

    pub fn get_sites_exhausted(&self) -> u64 {
        self.sites_exhausted.load(Ordering::Relaxed)
    }

    pub fn get_results_excluded(&self) -> u64 {
        self.results_excluded.load(Ordering::Relaxed)
    }

    pub fn get_samples_extracted(&self) -> u64 {
        self.samples_extracted.load(Ordering::Relaxed)
    }

    pub fn get_failure_rate(&self) -> f64 {
        let attempts = self.get_search_attempts();
        if attempts == 0 {
            0.0
        } else {
            self.get_search_failures() as f64 / attempts as f64
        }
    }

    pub fn get_uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn snapshot(&self) -> HashMap<String, serde_json::Value> {
        let mut snapshot = HashMap::new();

        snapshot.insert("scans".to_string(), serde_json::json!(self.get_scans()));
        snapshot.insert(
            "empty_scans".to_string(),
            serde_json::json!(self.get_empty_scans()),
        );
        snapshot.insert(
            "search_attempts".to_string(),
            serde_json::json!(self.get_search_attempts()),
        );
        snapshot.insert(
            "search_failures".to_string(),
            serde_json::json!(self.get_search_failures()),
        );
        snapshot.insert(
            "rate_limited".to_string(),
            serde_json::json!(self.get_rate_limited()),
        );
        snapshot.insert(
            "sites_exhausted".to_string(),
            serde_json::json!(self.get_sites_exhausted()),
        );
        snapshot.insert(
            "results_excluded".to_string(),
            serde_json::json!(self.get_results_excluded()),
        );
        snapshot.insert(
            "samples_extracted".to_string(),
            serde_json::json!(self.get_samples_extracted()),
        );
        snapshot.insert(
            "failure_rate".to_string(),
            serde_json::json!(self.get_failure_rate()),
        );
        snapshot.insert(
            "uptime_secs".to_string(),
            serde_json::json!(self.get_uptime_secs()),
        );

        snapshot
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}
