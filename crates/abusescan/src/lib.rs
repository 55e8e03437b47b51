//! AbuseIPDB reputation checks for lists of hosts.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use abusescan::{AbuseIpDbClient, Resolve, SystemResolver};
//!
//! #[tokio::main]
//! async fn main() -> abusescan::Result<()> {
//!     let client = AbuseIpDbClient::new("your-api-key")?;
//!     let ip = SystemResolver::new().resolve_ipv4("example.com").await?;
//!
//!     let record = client.check().address(ip).await?;
//!     if record.has_abuse() {
//!         println!("{ip} --> {record}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - rustls and the hickory resolver
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS
//! - `hickory` - Enable [`DnsResolver`], which queries nameservers directly

#![doc(html_root_url = "https://docs.rs/abusescan/0.3.0")]

// Re-export core types
pub use abusescan_core::*;

// Re-export client
pub use abusescan_client::{
    api::MAX_AGE_IN_DAYS, AbuseIpDbClient, AbuseIpDbClientBuilder, RateLimit, ReputationLookup,
};

// Re-export resolution
pub use abusescan_recon::{first_ipv4, ReconError, ReconResult, Resolve, SystemResolver};

#[cfg(feature = "hickory")]
pub use abusescan_recon::DnsResolver;

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
