use thiserror::Error;

/// Result type alias for resolution operations
pub type ReconResult<T> = std::result::Result<T, ReconError>;

/// Errors from hostname resolution
#[derive(Error, Debug)]
pub enum ReconError {
    /// The lookup itself failed (unknown host, network error)
    #[error("DNS error: {0}")]
    Dns(String),

    /// The lookup succeeded but returned no IPv4 address
    #[error("no resolvable IPv4 address for {0}")]
    NoIpv4Address(String),

    /// The resolver could not be set up
    #[error("resolver setup failed: {0}")]
    Setup(String),
}

impl From<ReconError> for abusescan_core::AbuseError {
    fn from(err: ReconError) -> Self {
        match err {
            ReconError::Dns(msg) => Self::Dns(msg),
            ReconError::NoIpv4Address(target) => {
                Self::Dns(format!("no resolvable IPv4 address for {target}"))
            }
            ReconError::Setup(msg) => Self::Config(msg),
        }
    }
}
