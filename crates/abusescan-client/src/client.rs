//! Main AbuseIPDB API client implementation.

use crate::api::CheckApi;
use crate::config::RateLimit;
use abusescan_core::{AbuseError, Result};
use governor::{DefaultDirectRateLimiter, RateLimiter};
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The AbuseIPDB v2 API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.abuseipdb.com/api/v2";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Main AbuseIPDB API client
#[derive(Clone)]
pub struct AbuseIpDbClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: String,
    base_url: String,
    timeout: Duration,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl AbuseIpDbClient {
    /// Create a new client with the given API key using default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        AbuseIpDbClientBuilder::new(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> AbuseIpDbClientBuilder {
        AbuseIpDbClientBuilder::new(api_key)
    }

    /// Access the `check` endpoint
    #[must_use]
    pub const fn check(&self) -> CheckApi<'_> {
        CheckApi::new(self)
    }

    /// The base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Per-request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Perform a GET request with query parameters
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        if let Some(limiter) = &self.inner.limiter {
            limiter.until_ready().await;
        }

        let url = self.build_url(path)?;
        debug!(url = %url, ?params, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .query(params)
            .header("Key", &self.inner.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.inner.base_url, path);
        Url::parse(&raw).map_err(|e| AbuseError::InvalidUrl(format!("{raw}: {e}")))
    }

    fn transport_error(&self, e: &reqwest::Error) -> AbuseError {
        if e.is_timeout() {
            AbuseError::Timeout(self.inner.timeout.as_secs())
        } else if e.is_connect() {
            AbuseError::Connection(e.to_string())
        } else {
            AbuseError::Http(e.to_string())
        }
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.transport_error(&e))?;
            serde_json::from_str(&body).map_err(AbuseError::Json)
        } else {
            Self::handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to an `AbuseError`
    async fn handle_error<T>(status: u16, response: reqwest::Response) -> Result<T> {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();
        let message = error_detail(&body).unwrap_or(body);

        match status {
            401 | 403 => Err(AbuseError::Unauthorized),
            422 => Err(AbuseError::InvalidRequest(message)),
            429 => {
                warn!(?retry_after, "Rate limited by AbuseIPDB");
                Err(AbuseError::RateLimited { retry_after })
            }
            _ => Err(AbuseError::Api {
                code: status,
                message,
            }),
        }
    }
}

/// Pull `errors[0].detail` out of an AbuseIPDB error body
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .pointer("/errors/0/detail")?
        .as_str()
        .map(String::from)
}

/// Builder for configuring an [`AbuseIpDbClient`]
pub struct AbuseIpDbClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    rate_limit: Option<RateLimit>,
}

impl AbuseIpDbClientBuilder {
    /// Create a new builder with the given API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("abusescan/{}", env!("CARGO_PKG_VERSION")),
            rate_limit: None,
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Throttle outgoing requests on the client side
    #[must_use]
    pub fn rate_limit(mut self, limit: RateLimit) -> Self {
        self.rate_limit = Some(limit);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AbuseIpDbClient> {
        if self.api_key.trim().is_empty() {
            return Err(AbuseError::Config("API key must not be empty".into()));
        }

        let parsed = Url::parse(&self.base_url)
            .map_err(|e| AbuseError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AbuseError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                self.base_url,
                parsed.scheme()
            )));
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| AbuseError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(AbuseIpDbClient {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key.trim().to_string(),
                base_url: self.base_url.trim_end_matches('/').to_string(),
                timeout: self.timeout,
                limiter: self.rate_limit.map(|l| RateLimiter::direct(l.quota())),
            }),
        })
    }
}
