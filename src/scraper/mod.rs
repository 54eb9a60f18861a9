//! Page download and main-text extraction.
//!
//! The handler only talks to [`PageScraper`]; [`HttpScraper`] is the
//! production implementation backed by reqwest and the `scraper` HTML parser.

pub mod extract;
pub mod fetch;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;

pub use extract::extract_main_text;
pub use fetch::{build_client, fetch_html};

/// Download and extract steps of a scrape.
///
/// `Ok(None)` is an expected miss (page unreachable, nothing readable);
/// `Err` is reserved for failures nobody anticipated.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<Option<String>>;

    async fn extract(&self, html: String, url: &str) -> anyhow::Result<Option<String>>;
}

pub struct HttpScraper {
    client: Client,
    max_body_bytes: usize,
}

impl HttpScraper {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = build_client(config).context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

#[async_trait]
impl PageScraper for HttpScraper {
    async fn fetch(&self, url: &str) -> anyhow::Result<Option<String>> {
        Ok(fetch_html(&self.client, url, self.max_body_bytes).await)
    }

    async fn extract(&self, html: String, url: &str) -> anyhow::Result<Option<String>> {
        let html_bytes = html.len();
        // Parsing large documents is CPU bound; keep it off the reactor.
        let text = tokio::task::spawn_blocking(move || extract_main_text(&html))
            .await
            .with_context(|| format!("Extraction task failed for {}", url))?;

        debug!(
            url,
            html_bytes,
            text_chars = text.as_ref().map_or(0, String::len),
            "Extracted main text"
        );
        Ok(text)
    }
}
