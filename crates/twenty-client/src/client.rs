//! HTTP transport for the Twenty REST API.
//!
//! ## Security
//!
//! - The API key is redacted in Debug output
//! - Error bodies are sanitized before they reach error messages

use std::sync::LazyLock;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::{ClientConfig, TwentyCredentials};
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestMethod, RequestOptions};
use crate::transport::Transport;

/// reqwest-backed [`Transport`] for a Twenty workspace.
///
/// Paths are resolved against `<base_url>/rest/`, so `people/<id>` becomes
/// `https://api.twenty.com/rest/people/<id>`.
///
/// # Example
///
/// ```rust,ignore
/// use twenty_client::{RequestMethod, RequestOptions, Transport, TwentyClient};
///
/// let client = TwentyClient::new("https://api.twenty.com", "api-key")?;
/// let body = client
///     .request(RequestMethod::Get, "people", RequestOptions::new().query("limit", "5"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct TwentyClient {
    http: reqwest::Client,
    config: ClientConfig,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for TwentyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwentyClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl TwentyClient {
    /// Create a new client with the default configuration.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, api_key, ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let creds = TwentyCredentials::new(base_url, api_key);
        Self::from_credentials(&creds, config)
    }

    /// Create a client from loaded credentials.
    pub fn from_credentials(creds: &TwentyCredentials, config: ClientConfig) -> Result<Self> {
        creds.validate()?;

        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed);

        let http = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            http,
            config,
            base_url: creds.base_url().to_string(),
            api_key: creds.api_key().to_string(),
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the REST URL for a path.
    ///
    /// Example: `rest_url("people")` -> `https://api.twenty.com/rest/people`
    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and decode the JSON body.
    #[instrument(skip(self, options), fields(method = %method, path = %path))]
    pub async fn execute(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value> {
        let mut url = url::Url::parse(&self.rest_url(path))?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&options.query);
        }

        let mut req = self
            .http
            .request(method.to_reqwest(), url.clone())
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json");

        if let Some(ref body) = options.body {
            req = req.json(body);
        }

        if self.config.enable_tracing {
            debug!(url = %url, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if self.config.enable_tracing {
            let content_length = response.content_length();
            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);

            return Err(Error::new(ErrorKind::RateLimited { retry_after }));
        }

        let success = response.status().is_success();
        let text = response.text().await?;

        if !success {
            return Err(parse_error_response(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(Into::into)
    }
}

impl Transport for TwentyClient {
    async fn request(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value> {
        self.execute(method, path, options).await
    }
}

/// Error body shape returned by the Twenty REST API.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TwentyErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    messages: Vec<String>,
}

/// Convert a non-success response into an [`Error`] carrying status and body.
fn parse_error_response(status: u16, body: &str) -> Error {
    let sanitized_body = sanitize_error_message(body);

    let message = match serde_json::from_str::<TwentyErrorResponse>(body) {
        Ok(parsed) => {
            let mut parts: Vec<String> = parsed.error.into_iter().collect();
            parts.extend(parsed.message);
            parts.extend(parsed.messages);
            if parts.is_empty() {
                sanitized_body.clone()
            } else {
                sanitize_error_message(&parts.join(": "))
            }
        }
        Err(_) => sanitized_body.clone(),
    };

    Error::new(ErrorKind::Api {
        status,
        message,
        body: (!body.is_empty()).then_some(sanitized_body),
    })
}

static JWT_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+")
        .expect("JWT pattern is a valid regex")
});

/// Sanitize an error message to prevent exposing sensitive data.
///
/// API keys are JWTs, so anything JWT-shaped is redacted. Messages longer
/// than 500 characters are truncated.
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = JWT_PATTERN
        .replace_all(message, "[REDACTED_TOKEN]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
