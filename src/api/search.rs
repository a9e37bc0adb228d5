use async_trait::async_trait;

use super::types::SearchResult;
use crate::core::SearchError;

/// Full-text web search, scoped by the caller through the query string.
///
/// Implementations may fail with any [`SearchError`]; callers treat every
/// failure as transient.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        region: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;
}
