//! Configuration types for the client and the crawler
//!
//! Everything here deserializes from YAML or JSON, with defaults for every
//! field except the base URL. The library never reads files itself.

use crate::auth::AuthConfig;
use crate::decode::Format;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::{constrain_page_size, DEFAULT_PAGE_SIZE};
use crate::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

// ============================================================================
// Client Config
// ============================================================================

/// Connection settings for one API deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `https://gtr.ukri.org/gtr/api`
    pub base_url: String,

    /// Records per page, clamped to 25..=100 when used
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Wire format to request
    #[serde(default)]
    pub format: Format,

    /// Basic auth username
    #[serde(default)]
    pub username: Option<String>,

    /// Basic auth password
    #[serde(default)]
    pub password: Option<String>,

    /// Transport settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Crawl settings
    #[serde(default)]
    pub crawl: CrawlSettings,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl ClientConfig {
    /// Create a config for `base_url` with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            format: Format::default(),
            username: None,
            password: None,
            http: HttpSettings::default(),
            crawl: CrawlSettings::default(),
        }
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the wire format
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set basic credentials
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    /// Set transport settings
    #[must_use]
    pub fn with_http(mut self, http: HttpSettings) -> Self {
        self.http = http;
        self
    }

    /// Set crawl settings
    #[must_use]
    pub fn with_crawl(mut self, crawl: CrawlSettings) -> Self {
        self.crawl = crawl;
        self
    }

    /// Page size actually sent to the API
    pub fn effective_page_size(&self) -> u32 {
        constrain_page_size(Some(self.page_size)).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Base URL without a trailing slash
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Credentials as an auth config
    pub fn auth(&self) -> AuthConfig {
        AuthConfig::from_credentials(self.username.clone(), self.password.clone())
    }

    /// Settings for the reqwest transport
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries)
            .auth(self.auth());

        if let Some(rps) = self.http.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }
        if let Some(ref agent) = self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder.build()
    }

    /// Check the config for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_config_field("base_url"));
        }

        let url = Url::parse(self.api_root())
            .map_err(|e| Error::invalid_config("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(Error::invalid_config(
                "password",
                "a password needs a username",
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_config("http.timeout_secs", "must be positive"));
        }

        Ok(())
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// Transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries per request; zero means one failed request is final
    #[serde(default)]
    pub max_retries: u32,

    /// Optional cap on raw request rate
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: 0,
            requests_per_second: None,
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

// ============================================================================
// Crawl Settings
// ============================================================================

/// Settings for a full crawl across every entity kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSettings {
    /// Minimum time between processed records, in milliseconds
    #[serde(default)]
    pub min_request_gap_ms: u64,

    /// Replace each list summary with the full entity before the callback
    #[serde(default = "default_true")]
    pub refresh: bool,

    /// Maximum projects to process
    #[serde(default)]
    pub project_limit: Option<u64>,

    /// Maximum people to process
    #[serde(default)]
    pub person_limit: Option<u64>,

    /// Maximum organisations to process
    #[serde(default)]
    pub organisation_limit: Option<u64>,

    /// Maximum publications to process
    #[serde(default)]
    pub publication_limit: Option<u64>,

    /// Attach every project of an organisation before its callback
    #[serde(default = "default_true")]
    pub load_all_projects: bool,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            min_request_gap_ms: 0,
            refresh: true,
            project_limit: None,
            person_limit: None,
            organisation_limit: None,
            publication_limit: None,
            load_all_projects: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl CrawlSettings {
    /// Record limit for `kind`
    pub fn limit(&self, kind: EntityKind) -> Option<u64> {
        match kind {
            EntityKind::Project => self.project_limit,
            EntityKind::Person => self.person_limit,
            EntityKind::Organisation => self.organisation_limit,
            EntityKind::Publication => self.publication_limit,
        }
    }

    /// Minimum gap between processed records
    pub fn min_request_gap(&self) -> Duration {
        Duration::from_millis(self.min_request_gap_ms)
    }
}
