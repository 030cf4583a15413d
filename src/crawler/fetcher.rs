//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the shared client with the fixed browser-like header set
//! - GET requests with optional query parameters
//! - Classifying failures for logging
//!
//! There is no retry here. A failed request is final for that URL.

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Response with a 2xx status
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },

    /// Response outside the 2xx range
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport failure (DNS, connect, timeout, body read)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by every request of a run
///
/// # Arguments
///
/// * `config` - Header values and request timeout
///
/// # Example
///
/// ```no_run
/// use wb_harvest::config::HttpConfig;
/// use wb_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.accept) {
        headers.insert(ACCEPT, value);
    }
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends one GET request and classifies the outcome
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `params` - Query parameters appended to `url` (may be empty)
pub async fn fetch_url(client: &Client, url: &str, params: &[(&str, String)]) -> FetchResult {
    let mut request = client.get(url);
    if !params.is_empty() {
        request = request.query(params);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Fetches a URL and parses it as HTML
///
/// Every failure is absorbed: transport errors and non-2xx statuses are
/// logged and reported as `None`.
pub async fn fetch_document(
    client: &Client,
    url: &str,
    params: &[(&str, String)],
) -> Option<Html> {
    match fetch_url(client, url, params).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            tracing::trace!("GET {} -> {} ({} bytes)", final_url, status_code, body.len());
            Some(Html::parse_document(&body))
        }
        FetchResult::HttpError { status_code } => {
            tracing::warn!("GET {} returned HTTP {}", url, status_code);
            None
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("GET {} failed: {}", url, error);
            None
        }
    }
}
