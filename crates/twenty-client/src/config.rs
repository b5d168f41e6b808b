//! Client configuration and credentials.

use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

/// Settings for the reqwest-backed [`TwentyClient`](crate::TwentyClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Send `Accept-Encoding: gzip, deflate`.
    pub accept_compressed: bool,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
    /// Log each request and response status at `debug`.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            accept_compressed: true,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Whole-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Base URL and API key for a Twenty workspace.
///
/// The API key is redacted in Debug output.
#[derive(Clone)]
pub struct TwentyCredentials {
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for TwentyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwentyCredentials")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl TwentyCredentials {
    /// Create credentials from a base URL and an API key.
    ///
    /// Trailing slashes are trimmed from the base URL.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Required environment variables:
    /// - `TWENTY_API_URL` or `TWENTY_BASE_URL`
    /// - `TWENTY_API_KEY` or `TWENTY_TOKEN`
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("TWENTY_API_URL")
            .or_else(|_| std::env::var("TWENTY_BASE_URL"))
            .map_err(|_| Error::new(ErrorKind::EnvVar("TWENTY_API_URL".to_string())))?;

        let api_key = std::env::var("TWENTY_API_KEY")
            .or_else(|_| std::env::var("TWENTY_TOKEN"))
            .map_err(|_| Error::new(ErrorKind::EnvVar("TWENTY_API_KEY".to_string())))?;

        let creds = Self::new(base_url, api_key);
        creds.validate()?;
        Ok(creds)
    }

    /// Check that the base URL parses and the key is non-empty.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;
        if self.api_key.is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "API key must not be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// The workspace base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
