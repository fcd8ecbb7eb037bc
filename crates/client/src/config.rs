//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use shopfront_observability::LogFormat;

pub const ENV_CATALOG: &str = "SHOPFRONT_CATALOG";
pub const ENV_LOADING_DELAY_MS: &str = "SHOPFRONT_LOADING_DELAY_MS";
pub const ENV_DEBOUNCE_MS: &str = "SHOPFRONT_DEBOUNCE_MS";
pub const ENV_LOG_FORMAT: &str = "SHOPFRONT_LOG_FORMAT";

/// Where the catalog payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    Url(String),
    File(PathBuf),
}

impl CatalogLocation {
    /// `http://` and `https://` are URLs; anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

impl core::fmt::Display for CatalogLocation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CatalogLocation::Url(url) => f.write_str(url),
            CatalogLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Catalog payload location
    pub catalog: CatalogLocation,
    /// Minimum time the loading indicator stays up after a successful fetch
    pub loading_delay: Duration,
    /// Idle interval before a typed query is applied
    pub debounce: Duration,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogLocation::File(PathBuf::from("products.json")),
            loading_delay: Duration::from_millis(1000),
            debounce: Duration::from_millis(300),
            log_format: LogFormat::Json,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `SHOPFRONT_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparseable values are ignored (with a warning) and the current value is kept.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_CATALOG).filter(|v| !v.trim().is_empty()) {
            self.catalog = CatalogLocation::parse(&v);
        }

        if let Some(v) = lookup(ENV_LOADING_DELAY_MS) {
            match parse_millis(&v) {
                Some(delay) => self.loading_delay = delay,
                None => tracing::warn!(key = ENV_LOADING_DELAY_MS, value = %v, "ignoring invalid duration"),
            }
        }

        if let Some(v) = lookup(ENV_DEBOUNCE_MS) {
            match parse_millis(&v) {
                Some(interval) => self.debounce = interval,
                None => tracing::warn!(key = ENV_DEBOUNCE_MS, value = %v, "ignoring invalid duration"),
            }
        }

        if let Some(v) = lookup(ENV_LOG_FORMAT) {
            match LogFormat::parse(&v) {
                Some(format) => self.log_format = format,
                None => tracing::warn!(key = ENV_LOG_FORMAT, value = %v, "ignoring unknown log format"),
            }
        }

        self
    }

    pub fn with_catalog(mut self, catalog: CatalogLocation) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_loading_delay(mut self, delay: Duration) -> Self {
        self.loading_delay = delay;
        self
    }

    pub fn with_debounce(mut self, interval: Duration) -> Self {
        self.debounce = interval;
        self
    }
}

fn parse_millis(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_millis)
}
