//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests that classify the response for the pipeline
//! - Mapping every outcome to exactly one `FetchedPage`

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;

/// Maximum redirect hops followed for a single request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched a text resource
    Success {
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value, if the server sent one
        content_type: Option<String>,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpStatus {
        /// The HTTP status code
        status_code: u16,
    },

    /// Resource is not a text document (images, archives, ...)
    UnsupportedContentType {
        /// The HTTP status code
        status_code: u16,
        /// The Content-Type received
        content_type: String,
    },

    /// Transport failure (connection refused, timeout, broken body, ...)
    Failed {
        /// Error description
        error: String,
    },
}

/// Raw fetch output handed from the fetch stage to the parse stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// The requested URL
    pub url: String,
    pub mime_type: Option<String>,
    /// HTTP status code; 0 when no response was received
    pub status_code: u16,
    /// Response body, present only for text resources
    pub body: Option<String>,
}

impl FetchedPage {
    /// Converts a fetch outcome into the record the parse stage consumes
    pub fn from_result(url: String, result: FetchResult) -> Self {
        match result {
            FetchResult::Success {
                status_code,
                content_type,
                body,
            } => Self {
                url,
                mime_type: content_type,
                status_code,
                body: Some(body),
            },
            FetchResult::HttpStatus { status_code } => Self {
                url,
                mime_type: None,
                status_code,
                body: None,
            },
            FetchResult::UnsupportedContentType {
                status_code,
                content_type,
            } => Self {
                url,
                mime_type: Some(content_type),
                status_code,
                body: None,
            },
            FetchResult::Failed { .. } => Self {
                url,
                mime_type: None,
                status_code: 0,
                body: None,
            },
        }
    }
}

/// Source of page content for the fetch stage
///
/// Implementations must never fail: every error is reported through
/// [`FetchResult`].
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send;
}

/// [`Fetch`] implementation backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the configuration
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(crawler, user_agent)?,
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use webcrawler::config::Config;
/// use webcrawler::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with GET and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx, text content type | `Success` |
/// | 2xx, other content type | `UnsupportedContentType` |
/// | non-2xx status | `HttpStatus` |
/// | transport or body read error | `Failed` |
///
/// There is no retry.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", url, e);
            return FetchResult::Failed {
                error: e.to_string(),
            };
        }
    };

    let status = response.status();
    let status_code = status.as_u16();

    if !status.is_success() {
        tracing::debug!("Failed to fetch data. HTTP status code: {}", status_code);
        return FetchResult::HttpStatus { status_code };
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if !is_text_content_type(content_type.as_deref()) {
        let content_type = content_type.unwrap_or_default();
        tracing::debug!("Non-text resource {} ({})", url, content_type);
        return FetchResult::UnsupportedContentType {
            status_code,
            content_type,
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code,
            content_type,
            body,
        },
        Err(e) => {
            tracing::warn!("Failed to read body of {}: {}", url, e);
            FetchResult::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Returns true for content types whose body is read as text
///
/// Accepts `text/*`, XML types and a missing header.
pub fn is_text_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence.starts_with("text/")
        || essence == "application/xml"
        || (essence.starts_with("application/") && essence.ends_with("+xml"))
}

/// Returns true if the content type denotes an HTML document
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"))
}
