//! HTTP fetcher for crawlable pages
//!
//! This module handles page retrieval for the crawl loop:
//! - Building the shared HTTP client with the configured identity header
//! - GET requests with a fixed timeout
//! - Retry logic for transient failures
//! - Terminal status classification (404/403 are outcomes, not errors)

use crate::config::{CrawlerConfig, HttpConfig};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of a fetch attempt sequence
///
/// No variant is fatal to a crawl: the caller maps everything except
/// `Success` to "skip this URL and continue".
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page was retrieved
    Success {
        /// Response body
        body: String,
        /// Content-Type header value (may be empty)
        content_type: String,
    },

    /// HTTP 404 - terminal, never retried
    NotFound,

    /// HTTP 403 - terminal, never retried
    Forbidden,

    /// Every attempt failed transiently
    ExhaustedRetries,
}

/// Retry behavior for transient fetch failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,
    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            attempts: config.retry_attempts,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

/// Builds the HTTP client shared by page fetches and file downloads
///
/// The client-level timeout is the page timeout; file downloads override
/// it per request with the longer file timeout.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.page_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type header denotes an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_lowercase().contains("text/html")
}

/// Fetches a page with bounded retries
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Return Success immediately |
/// | HTTP 404 | Immediate NotFound, no retry |
/// | HTTP 403 | Immediate Forbidden, no retry |
/// | Other status | Retry after fixed backoff |
/// | Timeout / connection error | Retry after fixed backoff |
///
/// After `policy.attempts` attempts without success the outcome is
/// `ExhaustedRetries`. The backoff is fixed, never exponential, so the
/// worst case is bounded at `attempts * (timeout + backoff)`.
pub async fn fetch_page(client: &Client, url: &Url, policy: &RetryPolicy) -> FetchOutcome {
    for attempt in 1..=policy.attempts {
        match client.get(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();

                if status == StatusCode::NOT_FOUND {
                    tracing::debug!("404 Not Found: {}", url);
                    return FetchOutcome::NotFound;
                }

                if status == StatusCode::FORBIDDEN {
                    tracing::debug!("403 Forbidden: {}", url);
                    return FetchOutcome::Forbidden;
                }

                if status.is_success() {
                    let content_type = response
                        .headers()
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();

                    match response.text().await {
                        Ok(body) => return FetchOutcome::Success { body, content_type },
                        Err(e) => {
                            tracing::warn!(
                                "Body read failed (attempt {}/{}) for {}: {}",
                                attempt,
                                policy.attempts,
                                url,
                                e
                            );
                        }
                    }
                } else {
                    tracing::warn!(
                        "HTTP {} (attempt {}/{}) for {}",
                        status,
                        attempt,
                        policy.attempts,
                        url
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Connection error (attempt {}/{}) for {}: {}",
                    attempt,
                    policy.attempts,
                    url,
                    e
                );
            }
        }

        if attempt < policy.attempts {
            tokio::time::sleep(policy.backoff).await;
        }
    }

    FetchOutcome::ExhaustedRetries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = HttpConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = CrawlerConfig::default();
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.backoff, Duration::from_millis(2000));
    }

    #[test]
    fn test_html_content_type_detection() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("Text/HTML"));
        assert!(!is_html_content_type("application/pdf"));
        assert!(!is_html_content_type(""));
    }

    // Retry and status classification are covered with wiremock servers in
    // the integration tests.
}
