use serde::{Deserialize, Serialize};

/// One hit returned by the search provider for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub body: String,
    pub url: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: url.into(),
        }
    }

    /// Title and body joined with a space, the text prices are read from.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}
