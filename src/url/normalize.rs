use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// List of tracking query parameters removed by canonical normalization
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "mc_eid",
];

/// How URLs are reduced to a visited-set key
///
/// The same policy is applied before every `contains` and `mark_visited`
/// call. The normalized form is an identity key only; the browser session
/// is always handed the address as it was discovered, minus its fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationPolicy {
    /// Exact string match of the parsed URL
    Exact,

    /// Exact match after removing the fragment
    #[default]
    StripFragment,

    /// Fragment removed, path cleaned, tracking parameters dropped and the
    /// remaining query parameters sorted
    Canonical,
}

impl NormalizationPolicy {
    /// Returns the configuration name of this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::StripFragment => "strip-fragment",
            Self::Canonical => "canonical",
        }
    }
}

impl fmt::Display for NormalizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "strip-fragment" | "fragment" => Ok(Self::StripFragment),
            "canonical" => Ok(Self::Canonical),
            other => Err(ConfigError::UnknownValue {
                field: "normalization",
                value: other.to_string(),
            }),
        }
    }
}

/// Normalizes a URL according to the given policy
///
/// # Canonical Steps
///
/// 1. Remove the fragment
/// 2. Normalize the path:
///    - Remove dot segments and empty segments
///    - Remove trailing slash (except for root /)
/// 3. Remove tracking query parameters
/// 4. Sort remaining query parameters by key
/// 5. Remove an empty query string
///
/// Scheme, host and port are left alone so the origin never changes.
///
/// # Examples
///
/// ```
/// use sitescribe::url::{normalize_url, NormalizationPolicy};
/// use url::Url;
///
/// let url = Url::parse("https://example.com/page/?b=2&a=1#top").unwrap();
/// let canonical = normalize_url(&url, NormalizationPolicy::Canonical);
/// assert_eq!(canonical.as_str(), "https://example.com/page?a=1&b=2");
/// ```
pub fn normalize_url(url: &Url, policy: NormalizationPolicy) -> Url {
    let mut url = url.clone();

    match policy {
        NormalizationPolicy::Exact => url,
        NormalizationPolicy::StripFragment => {
            url.set_fragment(None);
            url
        }
        NormalizationPolicy::Canonical => {
            url.set_fragment(None);

            let normalized_path = normalize_path(url.path());
            url.set_path(&normalized_path);

            if url.query().is_some() {
                let params = filter_and_sort_query_params(&url);
                if params.is_empty() {
                    url.set_query(None);
                } else {
                    url.query_pairs_mut().clear().extend_pairs(params);
                }
            }

            url
        }
    }
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return "/".to_string();
    }

    format!("/{}", segments.join("/"))
}

/// Filters out tracking parameters and sorts remaining query parameters
fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    // Stable sort keeps repeated keys in their original relative order
    params.sort_by(|a, b| a.0.cmp(&b.0));

    params
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
