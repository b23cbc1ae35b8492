//! Browser session implementation
//!
//! This module defines the capability the traversal engine borrows for a
//! whole run, and the HTTP-backed session used by the binary:
//! - Building an HTTP client with the configured user agent
//! - GET requests following a bounded number of redirects
//! - Content-Type checks (only HTML yields page text)
//! - Error classification into navigation errors

use crate::config::SessionSettings;
use crate::crawler::parser::parse_html;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Result of one successful navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// The URL that was navigated to
    pub url: Url,

    /// Where the navigation ended after redirects
    pub final_url: Url,

    pub title: Option<String>,

    /// Extracted visible text (possibly empty)
    pub text: String,

    /// Outgoing links in document order
    pub links: Vec<String>,
}

/// Per-page navigation failure; never fatal to a run
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Navigation to {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got '{content_type}'")]
    ContentMismatch { url: String, content_type: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Browser session is closed")]
    Closed,
}

/// A single stateful browsing context
///
/// Only one navigation is ever in flight per session. The engine borrows
/// the session for a run; whoever created it is responsible for `close`.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigates to `url` and extracts its text and outgoing links
    async fn navigate(&mut self, url: &Url) -> Result<PageResult, NavigationError>;

    /// Releases the session; further navigations fail with `Closed`
    async fn close(&mut self) -> Result<(), NavigationError>;
}

/// Browser session backed by a plain HTTP client
pub struct HttpSession {
    client: Client,
    closed: bool,
}

impl HttpSession {
    /// Builds a session with the configured user agent and timeouts
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sitescribe::config::SessionSettings;
    /// use sitescribe::crawler::HttpSession;
    ///
    /// let session = HttpSession::new(&SessionSettings::default()).unwrap();
    /// ```
    pub fn new(settings: &SessionSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .redirect(Policy::limited(settings.max_redirects))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            closed: false,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl BrowserSession for HttpSession {
    /// Fetches a page with a single attempt
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx HTML | PageResult |
    /// | Non-2xx | Status |
    /// | Non-HTML Content-Type | ContentMismatch |
    /// | Timeout | Timeout |
    /// | Connect / other transport error | Network |
    async fn navigate(&mut self, url: &Url) -> Result<PageResult, NavigationError> {
        if self.closed {
            return Err(NavigationError::Closed);
        }

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NavigationError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_html(&content_type) {
            return Err(NavigationError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| NavigationError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        // Relative links resolve against where the redirects ended
        let parsed = parse_html(&body, &final_url);

        Ok(PageResult {
            url: url.clone(),
            final_url,
            title: parsed.title,
            text: parsed.text,
            links: parsed.links,
        })
    }

    async fn close(&mut self) -> Result<(), NavigationError> {
        if !self.closed {
            tracing::debug!("Closing HTTP browser session");
            self.closed = true;
        }
        Ok(())
    }
}

/// Accepts HTML and XHTML; an absent Content-Type is treated as HTML
fn is_html(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    lower.is_empty() || lower.contains("text/html") || lower.contains("application/xhtml+xml")
}

fn classify_error(url: &Url, e: reqwest::Error) -> NavigationError {
    if e.is_timeout() {
        NavigationError::Timeout {
            url: url.to_string(),
            after: Duration::ZERO,
        }
    } else if e.is_connect() {
        NavigationError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        NavigationError::Network {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
