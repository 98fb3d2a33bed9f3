//! DuckDuckGo search over the no-JS HTML endpoint.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use fable_core::{Error, SearchProvider};

const DEFAULT_BASE_URL: &str = "https://html.duckduckgo.com/html/";

/// Configuration for the DuckDuckGo search backend.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Base URL of the HTML endpoint.
    pub base_url: String,
    /// Cap on the combined snippet text handed to the summarizer.
    pub max_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_chars: 4000,
        }
    }
}

pub struct DuckDuckGoSearch {
    client: Client,
    config: SearchConfig,
}

impl DuckDuckGoSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent("fable/0.1.0")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Pull result snippets out of a DuckDuckGo HTML result page and
    /// merge them into one block of text.
    fn extract_snippets(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        // The no-JS endpoint marks each hit with .result__snippet;
        // titles live in .result__a.
        let snippet_selector = match Selector::parse(".result__snippet") {
            Ok(selector) => selector,
            Err(_) => return String::new(),
        };

        let mut combined = String::new();
        for snippet in document.select(&snippet_selector) {
            let text = snippet.text().collect::<Vec<_>>().join("");
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !combined.is_empty() {
                combined.push('\n');
            }
            combined.push_str(trimmed);
            if combined.len() >= self.config.max_chars {
                break;
            }
        }

        let cleaned = clean_text(&combined);
        truncate_chars(&cleaned, self.config.max_chars)
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str) -> Result<String, Error> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| Error::search(format!("Search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::search(format!(
                "Search API error {}: {}",
                status, query
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::search(format!("Failed to read response: {}", e)))?;

        let text = self.extract_snippets(&html);
        debug!(query = %query, chars = text.len(), "search complete");

        // An empty result is legitimate here; the pipeline decides what
        // to do with it.
        Ok(text)
    }
}

/// Clean up extracted text: collapse runs of whitespace, keep at most
/// two consecutive newlines.
fn clean_text(text: &str) -> String {
    let mut result = String::new();
    let mut prev_was_whitespace = false;
    let mut newline_count = 0;

    for ch in text.chars() {
        if ch == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push('\n');
            }
            prev_was_whitespace = true;
        } else if ch.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
            newline_count = 0;
        } else {
            result.push(ch);
            prev_was_whitespace = false;
            newline_count = 0;
        }
    }

    result.trim().to_string()
}

/// Truncate on a char boundary without splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}
