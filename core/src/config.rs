//! Client configuration.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::schema::Kind;

pub const DEFAULT_BASE_URL: &str = "https://www.wanikani.com/api/v2";

pub const ENV_API_KEY: &str = "WANIKANI_API_KEY";
pub const ENV_BASE_URL: &str = "WANIKANI_BASE_URL";
pub const ENV_ENDPOINTS: &str = "WANIKANI_ENDPOINTS";

/// Base URL, credential and endpoint list for a `WaniKaniClient`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
    /// Endpoints fetched by a refresh, in issue order.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<Kind>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_endpoints() -> Vec<Kind> {
    Kind::ALL.to_vec()
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            endpoints: default_endpoints(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: impl IntoIterator<Item = Kind>) -> Self {
        self.endpoints = endpoints.into_iter().collect();
        self
    }

    /// Read `WANIKANI_API_KEY` (required), `WANIKANI_BASE_URL` and
    /// `WANIKANI_ENDPOINTS` (comma-separated, e.g. `reviews,summary`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env` with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(list) = lookup(ENV_ENDPOINTS) {
            config.endpoints = parse_endpoints(&list)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }
}

fn parse_endpoints(list: &str) -> Result<Vec<Kind>, ConfigError> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Kind>().map_err(ConfigError::Invalid))
        .collect()
}
