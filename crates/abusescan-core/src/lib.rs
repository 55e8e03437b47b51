//! Core types and errors shared by the abusescan crates.
//!
//! - **Types**: the AbuseIPDB `check` response ([`CheckResponse`], [`ReputationRecord`])
//! - **Errors**: a single error enum, [`AbuseError`], with a [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use abusescan_core::{ReputationRecord, Result};
//!
//! fn report(record: &ReputationRecord) -> Result<()> {
//!     if record.has_abuse() {
//!         println!("{record}");
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/abusescan-core/0.3.0")]

mod error;
pub mod types;

pub use error::{AbuseError, Result};
pub use types::*;
