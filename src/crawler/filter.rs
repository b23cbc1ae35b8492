//! Link eligibility filter
//!
//! Decides whether a discovered link may be handed to the browser session.
//! Rejected links are dropped silently by the engine: they are neither
//! failures nor entries in the visited set.

use crate::url::{file_extension, Origin};
use crate::{UrlError, UrlResult};
use std::collections::HashSet;
use std::fmt;
use url::Url;

/// Binary and document suffixes that never yield page text
pub const DEFAULT_BLOCKED_EXTENSIONS: &[&str] = &[
    // Images
    "jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "ico", "tif", "tiff",
    // Audio
    "mp3", "wav", "ogg", "flac", "aac", "m4a",
    // Video
    "mp4", "m4v", "avi", "mov", "mkv", "webm", "wmv", "flv", "mpg", "mpeg",
    // Archives and binaries
    "zip", "rar", "7z", "tar", "gz", "tgz", "bz2", "xz", "exe", "dmg", "iso", "apk",
    // Office and PDF documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf",
];

/// Why a link was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The link is not an absolute URL
    Unparseable,

    /// Scheme other than http or https
    Scheme(String),

    /// The last path segment carries a blocked suffix
    BlockedExtension(String),

    /// Origin differs from the seed while same-origin restriction is on
    CrossOrigin,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparseable => write!(f, "not an absolute URL"),
            Self::Scheme(scheme) => write!(f, "unsupported scheme '{}'", scheme),
            Self::BlockedExtension(ext) => write!(f, "blocked extension '.{}'", ext),
            Self::CrossOrigin => write!(f, "outside the seed origin"),
        }
    }
}

/// Filter applied to every outgoing link before it is scheduled
#[derive(Debug, Clone)]
pub struct LinkFilter {
    seed_origin: Origin,
    same_origin: bool,
    blocked_extensions: HashSet<String>,
}

impl LinkFilter {
    /// Creates a filter for links discovered from `seed`
    ///
    /// The blocklist is injected so callers (and tests) control it; entries
    /// are compared case-insensitively and a leading dot is ignored.
    pub fn new<I, S>(seed: &Url, same_origin: bool, blocked_extensions: I) -> UrlResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let seed_origin = Origin::of(seed).ok_or(UrlError::MissingHost)?;
        let blocked_extensions = blocked_extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Ok(Self {
            seed_origin,
            same_origin,
            blocked_extensions,
        })
    }

    /// Creates a filter with the default blocklist
    pub fn with_default_blocklist(seed: &Url, same_origin: bool) -> UrlResult<Self> {
        Self::new(seed, same_origin, DEFAULT_BLOCKED_EXTENSIONS.iter().copied())
    }

    /// Evaluates a discovered link
    ///
    /// # Acceptance Rules
    ///
    /// 1. The link parses as an absolute URL
    /// 2. Its scheme is `http` or `https`
    /// 3. Its file extension (if any) is not blocked
    /// 4. With same-origin restriction on, its origin equals the seed's
    ///
    /// # Returns
    ///
    /// * `Ok(Url)` - The parsed, accepted link
    /// * `Err(RejectReason)` - The first rule the link failed
    pub fn evaluate(&self, link: &str) -> Result<Url, RejectReason> {
        let url = Url::parse(link.trim()).map_err(|_| RejectReason::Unparseable)?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(RejectReason::Scheme(url.scheme().to_string()));
        }

        if let Some(ext) = file_extension(&url) {
            if self.blocked_extensions.contains(&ext) {
                return Err(RejectReason::BlockedExtension(ext));
            }
        }

        if self.same_origin && !self.seed_origin.contains(&url) {
            return Err(RejectReason::CrossOrigin);
        }

        Ok(url)
    }
}
