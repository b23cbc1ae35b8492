//! In-memory browser session for exercising the traversal engine

use crate::crawler::{BrowserSession, NavigationError, PageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub enum FakePage {
    Html { text: String, links: Vec<String> },
    Fail(u16),
    Hang,
    Redirect(String),
}

/// A fixed site keyed by exact URL string; unknown URLs answer 404
#[derive(Debug, Default)]
pub struct FakeSite {
    pages: HashMap<String, FakePage>,
    pub navigations: Vec<String>,
    pub closed: bool,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, text: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FakePage::Html {
                text: text.to_string(),
                links: links.iter().map(|l| l.to_string()).collect(),
            },
        );
        self
    }

    pub fn failing(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), FakePage::Fail(status));
        self
    }

    pub fn hanging(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), FakePage::Hang);
        self
    }

    /// Answers `from` with the page stored at `to`, reporting `to` as final
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.pages
            .insert(from.to_string(), FakePage::Redirect(to.to_string()));
        self
    }
}

#[async_trait]
impl BrowserSession for FakeSite {
    async fn navigate(&mut self, url: &Url) -> Result<PageResult, NavigationError> {
        if self.closed {
            return Err(NavigationError::Closed);
        }
        self.navigations.push(url.to_string());

        let (final_url, page) = match self.pages.get(url.as_str()).cloned() {
            Some(FakePage::Redirect(to)) => (Url::parse(&to).unwrap(), self.pages.get(&to).cloned()),
            page => (url.clone(), page),
        };

        match page {
            Some(FakePage::Html { text, links }) => Ok(PageResult {
                url: url.clone(),
                final_url,
                title: None,
                text,
                links,
            }),
            Some(FakePage::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(NavigationError::Timeout {
                    url: url.to_string(),
                    after: Duration::from_secs(3600),
                })
            }
            Some(FakePage::Fail(status)) => Err(NavigationError::Status {
                url: url.to_string(),
                status,
            }),
            Some(FakePage::Redirect(_)) | None => Err(NavigationError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    async fn close(&mut self) -> Result<(), NavigationError> {
        self.closed = true;
        Ok(())
    }
}
