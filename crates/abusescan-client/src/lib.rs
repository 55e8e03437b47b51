//! HTTP client for the AbuseIPDB API.
//!
//! This crate provides [`AbuseIpDbClient`] for querying the `check` endpoint,
//! and the [`ReputationLookup`] trait the scan pipeline is written against.

#![doc(html_root_url = "https://docs.rs/abusescan-client/0.3.0")]

mod client;
mod config;
mod lookup;
pub mod api;

pub use client::{AbuseIpDbClient, AbuseIpDbClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use config::*;
pub use lookup::ReputationLookup;
pub use abusescan_core::{AbuseError, Result};
