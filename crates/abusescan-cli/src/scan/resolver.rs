//! Choice of resolver backend.

use abusescan::{Resolve, SystemResolver};
use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which resolver turns hostnames into addresses.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Operating system resolver (hosts file, nsswitch)
    #[default]
    System,
    /// Query the configured nameservers directly
    Dns,
}

impl ResolverKind {
    /// Build the resolver for this backend.
    pub fn build(self) -> Result<Box<dyn Resolve>> {
        match self {
            Self::System => Ok(Box::new(SystemResolver::new())),
            #[cfg(feature = "hickory")]
            Self::Dns => Ok(Box::new(abusescan::DnsResolver::new()?)),
            #[cfg(not(feature = "hickory"))]
            Self::Dns => anyhow::bail!("this build has no DNS resolver backend (feature `hickory`)"),
        }
    }
}

impl std::fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Dns => write!(f, "dns"),
        }
    }
}
