//! The `check` endpoint.

use crate::AbuseIpDbClient;
use abusescan_core::{CheckResponse, ReputationRecord, Result};
use std::net::Ipv4Addr;
use tracing::debug;

/// Report window sent with every check, in days
pub const MAX_AGE_IN_DAYS: u32 = 90;

/// Check API endpoint
pub struct CheckApi<'a> {
    client: &'a AbuseIpDbClient,
}

impl<'a> CheckApi<'a> {
    pub(crate) const fn new(client: &'a AbuseIpDbClient) -> Self {
        Self { client }
    }

    /// Get the reputation of an address over the last [`MAX_AGE_IN_DAYS`] days
    pub async fn address(&self, ip: Ipv4Addr) -> Result<ReputationRecord> {
        let ip = ip.to_string();
        let max_age = MAX_AGE_IN_DAYS.to_string();

        let response: CheckResponse = self
            .client
            .get_with_query(
                "/check",
                &[("ipAddress", ip.as_str()), ("maxAgeInDays", max_age.as_str())],
            )
            .await?;

        debug!(
            ip = %ip,
            score = response.data.abuse_confidence_score,
            reports = response.data.total_reports,
            "AbuseIPDB check complete"
        );

        Ok(response.data)
    }
}
