use std::fmt;
use url::Url;

/// Scheme, host and port of a URL; the unit of same-site restriction
///
/// The port is always explicit, using the scheme default when the URL
/// omits it, so `https://example.com` and `https://example.com:443` share
/// an origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    /// Extracts the origin of a URL
    ///
    /// Returns None if the URL has no host (which shouldn't happen for valid
    /// HTTP(S) URLs).
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use sitescribe::url::Origin;
    ///
    /// let a = Url::parse("https://EXAMPLE.com/path").unwrap();
    /// let b = Url::parse("https://example.com:443/other").unwrap();
    /// assert_eq!(Origin::of(&a), Origin::of(&b));
    /// ```
    pub fn of(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_lowercase();
        Some(Self {
            scheme: url.scheme().to_string(),
            host,
            port: url.port_or_known_default(),
        })
    }

    /// Returns true if the given URL belongs to this origin
    pub fn contains(&self, url: &Url) -> bool {
        Self::of(url).as_ref() == Some(self)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}://{}:{}", self.scheme, self.host, port),
            None => write!(f, "{}://{}", self.scheme, self.host),
        }
    }
}

/// Extracts the lowercase file extension of the last path segment
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitescribe::url::file_extension;
///
/// let url = Url::parse("https://example.com/files/Report.PDF?download=1").unwrap();
/// assert_eq!(file_extension(&url), Some("pdf".to_string()));
///
/// let url = Url::parse("https://example.com/docs/").unwrap();
/// assert_eq!(file_extension(&url), None);
/// ```
pub fn file_extension(url: &Url) -> Option<String> {
    let last = url.path_segments()?.last()?;
    let (stem, ext) = last.rsplit_once('.')?;

    if stem.is_empty() || ext.is_empty() {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}
