use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::Client;
use scraper::{Html, Selector};

use super::{SearchError, SearchProvider, SearchResult};
use crate::config::SearchConfig;

/// Search client backed by the DuckDuckGo HTML endpoint.
///
/// The HTML endpoint needs no API key: the query is POSTed as a form and the
/// results are scraped out of the returned page.
pub struct DuckDuckGoClient {
    endpoint: String,
    region: Option<String>,
    client: Client,
}

impl DuckDuckGoClient {
    /// Creates a client from the search section of the configuration.
    pub fn new(config: &SearchConfig, user_agent: &str) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            region: config.region.clone(),
            client,
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let mut form = vec![("q", query.to_string())];
        if let Some(region) = &self.region {
            form.push(("kl", region.clone()));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .header("Accept", "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(parse_results(&body, max_results))
    }
}

/// Extracts up to `max_results` records from a DuckDuckGo HTML result page.
///
/// A page with no `.result` elements yields an empty list. Kept separate from
/// the HTTP call so it can be exercised against canned pages; `scraper::Html`
/// is also `!Send`, so parsing must not live across an await.
fn parse_results(body: &str, max_results: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(body);

    let result_sel = Selector::parse(".result").unwrap();
    let link_sel = Selector::parse("a.result__a").unwrap();
    let snippet_sel = Selector::parse("a.result__snippet, .result__snippet").unwrap();

    let mut results = Vec::new();
    for element in document.select(&result_sel).take(max_results) {
        let title = element
            .select(&link_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default()
            .trim()
            .to_string();

        let href = element
            .select(&link_sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .unwrap_or("");
        let link = extract_ddg_url(href);

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default()
            .trim()
            .to_string();

        if link.is_empty() {
            continue;
        }

        results.push(SearchResult {
            title,
            link,
            snippet,
        });
    }

    results
}

/// DuckDuckGo wraps result URLs in redirect links like
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
/// Extract and percent-decode the actual destination URL.
fn extract_ddg_url(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + 5;
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            return percent_decode_str(encoded)
                .decode_utf8_lossy()
                .into_owned();
        }
    }
    href.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULT_PAGE: &str = r#"
        <html><body>
        <div class="result">
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fparis&rut=abc">Paris - Example</a>
            <a class="result__snippet">Paris is the capital of France.</a>
        </div>
        <div class="result">
            <a class="result__a" href="https://example.org/lyon">Lyon - Example</a>
            <div class="result__snippet">Lyon is a city in France.</div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_results() {
        let results = parse_results(RESULT_PAGE, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Paris - Example");
        assert_eq!(results[0].link, "https://example.com/paris");
        assert_eq!(results[0].snippet, "Paris is the capital of France.");
        assert_eq!(results[1].link, "https://example.org/lyon");
    }

    #[test]
    fn test_parse_results_respects_max() {
        let results = parse_results(RESULT_PAGE, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_parse_empty_page() {
        let results = parse_results("<html><body>No results.</body></html>", 3);
        assert!(results.is_empty());
    }

    #[test]
    fn test_extract_ddg_url_unwraps_redirect() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa%20b&rut=xyz";
        assert_eq!(extract_ddg_url(href), "https://example.com/a b");
    }

    #[test]
    fn test_extract_ddg_url_passes_plain_urls_through() {
        assert_eq!(
            extract_ddg_url("https://example.com/page"),
            "https://example.com/page"
        );
    }
}
