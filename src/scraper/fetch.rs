use reqwest::{Client, ClientBuilder, Url, redirect::Policy};
use tracing::{debug, warn};

use crate::config::Config;

const MAX_REDIRECTS: usize = 5;

pub fn build_client(config: &Config) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .timeout(config.fetch_timeout)
        .connect_timeout(config.connect_timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .pool_max_idle_per_host(10)
        .build()
}

/// Downloads a page as text.
///
/// Returns `None` for anything that leaves us without a usable document:
/// a malformed or non-http(s) URL, a transport error or timeout, a non-2xx
/// status, an oversized body, or a body that is empty after trimming.
pub async fn fetch_html(client: &Client, url: &str, max_body_bytes: usize) -> Option<String> {
    let parsed = match Url::parse(url.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed,
        Ok(parsed) => {
            warn!(url, scheme = parsed.scheme(), "Refusing to fetch non-http URL");
            return None;
        }
        Err(e) => {
            warn!(url, error = %e, "Invalid URL");
            return None;
        }
    };

    let mut response = match client.get(parsed).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(url, error = %e, "HTTP request failed");
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(url, %status, "Non-success status");
        return None;
    }

    let limit = u64::try_from(max_body_bytes).unwrap_or(u64::MAX);
    if let Some(length) = response.content_length() {
        if length > limit {
            warn!(url, length, max_body_bytes, "Declared body too large");
            return None;
        }
    }

    // Content-Length may be absent (chunked) or wrong, so count as we read.
    let mut bytes = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if bytes.len() + chunk.len() > max_body_bytes {
                    warn!(url, max_body_bytes, "Body too large");
                    return None;
                }
                bytes.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => {
                warn!(url, error = %e, "Failed to read response body");
                return None;
            }
        }
    }

    let body = String::from_utf8_lossy(&bytes).into_owned();
    if body.trim().is_empty() {
        warn!(url, "Empty response body");
        return None;
    }

    debug!(url, bytes = body.len(), "Fetched page");
    Some(body)
}
