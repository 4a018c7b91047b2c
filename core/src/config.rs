//! Startup configuration: the single resource base path every screen uses.

use url::Url;

use crate::client::trim_base;
use crate::error::ConfigError;

/// Environment variable consulted by `ClientConfig::from_env`.
pub const BASE_ENV: &str = "BLOG_API_BASE";

/// Base used when `BLOG_API_BASE` is unset.
pub const DEFAULT_BASE: &str = "http://localhost:9501/blog/api/blog_entry";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base: String,
}

impl ClientConfig {
    /// Accepts an absolute http(s) URL or an origin-relative path starting
    /// with `/`. One trailing slash is dropped; the root `/` stays as is.
    pub fn new(base: &str) -> Result<Self, ConfigError> {
        let base = base.trim();
        if base.is_empty() {
            return Err(ConfigError::Empty);
        }
        if !base.starts_with('/') {
            let url = Url::parse(base).map_err(|source| ConfigError::InvalidUrl {
                value: base.to_string(),
                source,
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
            }
        }
        Ok(Self {
            base: trim_base(base).to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_value(std::env::var(BASE_ENV).ok())
    }

    /// `BLOG_API_BASE` resolution with the variable's value passed in.
    fn from_value(value: Option<String>) -> Result<Self, ConfigError> {
        Self::new(value.as_deref().unwrap_or(DEFAULT_BASE))
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE.to_string(),
        }
    }
}
