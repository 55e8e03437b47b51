//! Hostname resolution for abusescan.
//!
//! Every input line is turned into exactly one IPv4 address before it is
//! checked. Two backends implement [`Resolve`]:
//!
//! - [`SystemResolver`] - the operating system resolver (hosts file, nsswitch)
//! - [`DnsResolver`] - hickory, querying the nameservers from `resolv.conf`
//!   (feature `hickory`, on by default)

#![doc(html_root_url = "https://docs.rs/abusescan-recon/0.3.0")]

mod error;
pub mod dns;

pub use dns::{first_ipv4, Resolve, SystemResolver};

#[cfg(feature = "hickory")]
pub use dns::DnsResolver;

pub use error::{ReconError, ReconResult};
