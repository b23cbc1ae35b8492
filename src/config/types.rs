use crate::crawler::DEFAULT_BLOCKED_EXTENSIONS;
use crate::url::NormalizationPolicy;
use crate::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_MAX_DEPTH: u32 = 5;
pub const DEFAULT_MAX_PAGES: u32 = 100;
pub const DEFAULT_OUTPUT_PATH: &str = "output.pdf";
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("sitescribe/", env!("CARGO_PKG_VERSION"));

/// Settings loaded from an optional TOML file and overridden by the CLI
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub crawler: CrawlerSettings,
    pub session: SessionSettings,
    pub filter: FilterSettings,
    pub output: OutputSettings,
}

/// Traversal limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerSettings {
    /// Maximum number of link hops from the seed
    pub max_depth: u32,

    /// Maximum number of pages successfully fetched in one run
    pub max_pages: u32,

    /// Only follow links sharing the seed's origin
    pub same_origin: bool,

    /// Visited-set key policy
    pub normalization: NormalizationPolicy,

    /// Upper bound on a single navigation (seconds)
    pub navigation_timeout_secs: u64,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_pages: DEFAULT_MAX_PAGES,
            same_origin: true,
            normalization: NormalizationPolicy::default(),
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
        }
    }
}

/// HTTP browser session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionSettings {
    pub user_agent: String,

    /// TCP connect timeout (seconds)
    pub connect_timeout_secs: u64,

    pub max_redirects: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 10,
            max_redirects: 10,
        }
    }
}

/// Link filter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterSettings {
    /// File extensions (without the dot) never handed to the session
    pub blocked_extensions: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            blocked_extensions: DEFAULT_BLOCKED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputSettings {
    /// Path of the rendered document
    pub path: PathBuf,

    /// Document format; inferred from the path extension when absent
    pub format: Option<OutputFormat>,

    pub layout: PageLayout,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            format: None,
            layout: PageLayout::default(),
        }
    }
}

impl OutputSettings {
    /// Returns the configured format, or the one implied by the output path
    pub fn resolved_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from_path(&self.path))
    }
}

/// Rendered document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Pdf,
    Markdown,
    Text,
}

impl OutputFormat {
    /// Infers a format from a file extension, defaulting to PDF
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("md") | Some("markdown") => Self::Markdown,
            Some("txt") | Some("text") => Self::Text,
            _ => Self::Pdf,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" => Ok(Self::Text),
            other => Err(ConfigError::UnknownValue {
                field: "format",
                value: other.to_string(),
            }),
        }
    }
}

/// Whether the renderer is fed the whole corpus or one page at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageLayout {
    /// The delimiter-joined corpus flows across document pages
    #[default]
    Continuous,

    /// Every visited page starts on a fresh document page
    PagePerEntry,
}

impl FromStr for PageLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continuous" => Ok(Self::Continuous),
            "page-per-entry" | "per-page" => Ok(Self::PagePerEntry),
            other => Err(ConfigError::UnknownValue {
                field: "layout",
                value: other.to_string(),
            }),
        }
    }
}

/// Immutable parameters of a single traversal run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Validated seed address
    pub seed: Url,

    pub max_depth: u32,

    pub max_pages: u32,

    /// Restrict traversal to the seed's origin
    pub same_origin: bool,

    pub normalization: NormalizationPolicy,

    pub navigation_timeout: Duration,
}

impl CrawlConfig {
    /// Creates a config for the given seed with default limits
    pub fn new(seed: Url) -> Self {
        Self::from_settings(seed, &CrawlerSettings::default())
    }

    pub fn from_settings(seed: Url, settings: &CrawlerSettings) -> Self {
        Self {
            seed,
            max_depth: settings.max_depth,
            max_pages: settings.max_pages,
            same_origin: settings.same_origin,
            normalization: settings.normalization,
            navigation_timeout: Duration::from_secs(settings.navigation_timeout_secs),
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_same_origin(mut self, same_origin: bool) -> Self {
        self.same_origin = same_origin;
        self
    }

    pub fn with_normalization(mut self, normalization: NormalizationPolicy) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }
}
