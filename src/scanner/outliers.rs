use serde::{Deserialize, Serialize};

/// Trimming thresholds for [`remove_outliers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlierConfig {
    /// Below this many samples nothing is trimmed.
    pub small_sample_limit: usize,
    /// Up to and including this many samples, only the single min and max go.
    pub medium_sample_limit: usize,
    pub low_trim_percent: usize,
    pub high_trim_percent: usize,
    pub min_survivors: usize,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            small_sample_limit: 5,
            medium_sample_limit: 15,
            low_trim_percent: 15,
            high_trim_percent: 10,
            min_survivors: 3,
        }
    }
}

/// Drops extreme prices according to sample size.
///
/// Small lists come back untouched (same order). Anything else comes back
/// sorted ascending with its tails cut. Never returns an empty list for a
/// non-empty input.
pub fn remove_outliers(prices: &[u64], config: &OutlierConfig) -> Vec<u64> {
    let n = prices.len();
    if n < config.small_sample_limit {
        return prices.to_vec();
    }

    let mut sorted = prices.to_vec();
    sorted.sort_unstable();

    let (low, high) = if n <= config.medium_sample_limit {
        (1, 1)
    } else {
        (
            n * config.low_trim_percent / 100,
            n * config.high_trim_percent / 100,
        )
    };

    let trimmed = trim(&sorted, low, high);
    if trimmed.len() >= config.min_survivors {
        return trimmed.to_vec();
    }

    let single = trim(&sorted, 1, 1);
    if single.is_empty() {
        return sorted;
    }
    single.to_vec()
}

fn trim(sorted: &[u64], low: usize, high: usize) -> &[u64] {
    if low + high >= sorted.len() {
        return &[];
    }
    &sorted[low..sorted.len() - high]
}

/// Median of an already sorted, non-empty slice. Even-length slices average
/// the two middle values, rounding down.
pub fn median(sorted: &[u64]) -> Option<u64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some(sorted[mid - 1] / 2 + sorted[mid] / 2 + (sorted[mid - 1] % 2 + sorted[mid] % 2) / 2)
    }
}
