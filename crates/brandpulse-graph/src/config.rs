//! Graph API connection settings.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_API_VERSION: &str = "v24.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingCredential(&'static str),
}

/// Credentials and endpoint for the Graph API.
///
/// `Debug` output redacts the access token.
#[derive(Clone)]
pub struct GraphConfig {
    pub access_token: String,
    /// Instagram business account that issues the discovery queries.
    pub ig_business_id: String,
    pub api_version: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GraphConfig {
    /// Build a config with default endpoint, version and timeout.
    ///
    /// Both credentials are required; blank values count as missing.
    pub fn new(
        access_token: impl Into<String>,
        ig_business_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let access_token = access_token.into();
        let ig_business_id = ig_business_id.into();
        if access_token.trim().is_empty() {
            return Err(ConfigError::MissingCredential("ACCESS_TOKEN"));
        }
        if ig_business_id.trim().is_empty() {
            return Err(ConfigError::MissingCredential("IG_BUSINESS_ID"));
        }
        Ok(Self {
            access_token,
            ig_business_id,
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Override the API host, e.g. for a local mock. Trailing slashes are dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for a Graph API node or edge path.
    pub fn endpoint(&self, api_path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.api_version,
            api_path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphConfig")
            .field("access_token", &"<redacted>")
            .field("ig_business_id", &self.ig_business_id)
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
