//! The lookup seam the scan pipeline is written against.

use crate::AbuseIpDbClient;
use abusescan_core::{ReputationRecord, Result};
use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Something that can report the reputation of an IPv4 address
#[async_trait]
pub trait ReputationLookup: Send + Sync {
    /// Look up a single address
    async fn lookup(&self, ip: Ipv4Addr) -> Result<ReputationRecord>;
}

#[async_trait]
impl ReputationLookup for AbuseIpDbClient {
    async fn lookup(&self, ip: Ipv4Addr) -> Result<ReputationRecord> {
        self.check().address(ip).await
    }
}
