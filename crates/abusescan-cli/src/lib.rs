//! # abusescan-cli
//!
//! Reads hostnames and IP addresses from a file, resolves each one to an
//! IPv4 address, checks it against AbuseIPDB and writes every address with
//! reported abuse to a report file.
//!
//! ## Features
//!
//! - **scan**: the file-to-report pipeline (`ip.txt` -> `res.txt` by default)
//! - **check / resolve**: one-off lookups for a single target
//! - **report**: re-read a report file as a table, JSON, CSV or YAML
//! - **config**: persistent defaults in a TOML file

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod scan;

pub use cli::run;
