use thiserror::Error;

/// Result type alias for abusescan operations
pub type Result<T> = std::result::Result<T, AbuseError>;

/// Errors that can occur when talking to AbuseIPDB or handling its records
#[derive(Error, Debug)]
pub enum AbuseError {
    /// Authentication failed - invalid or missing API key
    #[error("authentication failed: invalid API key")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, from the `Retry-After` header
        retry_after: Option<u64>,
    },

    /// The API rejected the request parameters (HTTP 422)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// A record dump could not be parsed back
    #[error("malformed record dump: {0}")]
    Parse(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AbuseError {
    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::InvalidRequest(_) => Some(422),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
