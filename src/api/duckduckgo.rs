use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::time::Duration;

use super::rate_limiter::{RateLimiterConfig, SearchRateLimiter};
use super::search::SearchProvider;
use super::types::SearchResult;
use crate::core::{ProviderConfig, SearchError};

const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Scrapes the DuckDuckGo HTML endpoint. No API key required.
pub struct DuckDuckGoClient {
    client: Client,
    endpoint: String,
    limiter: SearchRateLimiter,
}

impl DuckDuckGoClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        let limiter = SearchRateLimiter::new(RateLimiterConfig {
            max_requests: config.requests_per_window,
            window: Duration::from_secs(config.window_secs),
            ..Default::default()
        });

        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            limiter,
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    async fn search(
        &self,
        query: &str,
        region: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let permit = self.limiter.acquire().await?;

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query), ("kl", region)])
            .header("Accept", "text/html")
            .send()
            .await?;

        // DuckDuckGo answers 202 with a challenge page when it throttles scrapers.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let results = parse_results(&html, max_results)?;

        tracing::debug!(
            "DuckDuckGo returned {} results for {:?} in {:?} ({} searches left in window)",
            results.len(),
            query,
            permit.elapsed(),
            self.limiter.available_capacity().await
        );

        Ok(results)
    }
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("selector {css}: {e}")))
}

/// Pulls `{title, body, url}` triples out of a DuckDuckGo HTML results page.
/// Ads and entries without a title are skipped.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let result_sel = selector(".result")?;
    let link_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let doc = Html::parse_document(html);
    let mut results = Vec::new();

    for node in doc.select(&result_sel) {
        if results.len() >= max_results {
            break;
        }
        if node.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(link) = node.select(&link_sel).next() else {
            continue;
        };
        let title = collapse_whitespace(&link.text().collect::<String>());
        if title.is_empty() {
            continue;
        }

        let url = link
            .value()
            .attr("href")
            .map(resolve_redirect)
            .unwrap_or_default();

        let body = node
            .select(&snippet_sel)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default();

        results.push(SearchResult { title, body, url });
    }

    Ok(results)
}

/// Result links look like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
fn resolve_redirect(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + "uddg=".len();
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        return percent_decode_str(&href[start..end])
            .decode_utf8_lossy()
            .into_owned();
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{rest}");
    }
    href.to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <html><body>
          <div class="result results_links result--ad">
            <h2 class="result__title">
              <a class="result__a" href="https://ads.example.com/x">Sponsored sneakers</a>
            </h2>
            <a class="result__snippet">₹99 only</a>
          </div>
          <div class="result results_links">
            <h2 class="result__title">
              <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.amazon.in%2Fdp%2FB0X&amp;rut=abc">
                Running   Sneakers for Men
              </a>
            </h2>
            <a class="result__snippet" href="#">Buy now at ₹1,299 with free delivery</a>
          </div>
          <div class="result results_links">
            <h2 class="result__title">
              <a class="result__a" href="https://www.flipkart.com/sneakers/p/itm1">Canvas Sneakers</a>
            </h2>
            <a class="result__snippet">Rs. 899</a>
          </div>
          <div class="result results_links">
            <h2 class="result__title"><a class="result__a" href="https://x.example/"></a></h2>
          </div>
        </body></html>
    "##;

    #[test]
    fn test_parse_results_skips_ads_and_untitled() {
        let results = parse_results(PAGE, 10).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].title, "Running Sneakers for Men");
        assert_eq!(results[0].url, "https://www.amazon.in/dp/B0X");
        assert_eq!(results[0].body, "Buy now at ₹1,299 with free delivery");

        assert_eq!(results[1].title, "Canvas Sneakers");
        assert_eq!(results[1].url, "https://www.flipkart.com/sneakers/p/itm1");
    }

    #[test]
    fn test_parse_results_respects_cap() {
        let results = parse_results(PAGE, 1).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_parse_results_on_empty_page() {
        let results = parse_results("<html><body>No results.</body></html>", 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_resolve_redirect() {
        assert_eq!(
            resolve_redirect("//duckduckgo.com/l/?uddg=https%3A%2F%2Fmyntra.com%2Fa"),
            "https://myntra.com/a"
        );
        assert_eq!(
            resolve_redirect("//www.ajio.com/p/1"),
            "https://www.ajio.com/p/1"
        );
        assert_eq!(resolve_redirect("https://a.in/"), "https://a.in/");
    }
}
