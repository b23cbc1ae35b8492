//! URL handling module for Sitescribe
//!
//! This module provides seed validation, visited-set normalization policies,
//! origin comparison and file-extension extraction.

mod normalize;
mod origin;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use normalize::{normalize_url, NormalizationPolicy};
pub use origin::{file_extension, Origin};

/// Validates the seed address of a run
///
/// The seed must parse as an absolute `http` or `https` URL with a host, so
/// that it has a resolvable origin. Nothing is fetched here; a failure is
/// fatal to the run before any browser session is acquired.
///
/// # Examples
///
/// ```
/// use sitescribe::url::validate_seed;
///
/// assert!(validate_seed("https://example.com/docs").is_ok());
/// assert!(validate_seed("not a url").is_err());
/// assert!(validate_seed("ftp://example.com/").is_err());
/// ```
pub fn validate_seed(input: &str) -> UrlResult<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("empty input".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}
