use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope returned by the AbuseIPDB `check` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    /// The reputation record for the queried address
    pub data: ReputationRecord,
}

/// Reputation of a single address as reported by AbuseIPDB
///
/// Field names follow the service's camelCase JSON. Fields the service may
/// send as `null` are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationRecord {
    /// The queried address
    #[serde(default)]
    pub ip_address: String,

    /// Whether the address is publicly routable
    #[serde(default)]
    pub is_public: bool,

    /// IP version (4 or 6)
    #[serde(default)]
    pub ip_version: u8,

    /// Whether the address is on AbuseIPDB's whitelist
    #[serde(default)]
    pub is_whitelisted: Option<bool>,

    /// Abuse confidence score (0-100)
    #[serde(default)]
    pub abuse_confidence_score: u8,

    /// Two-letter country code
    #[serde(default)]
    pub country_code: Option<String>,

    /// Usage type (e.g. "Data Center/Web Hosting/Transit")
    #[serde(default)]
    pub usage_type: Option<String>,

    /// ISP name
    #[serde(default)]
    pub isp: Option<String>,

    /// Domain associated with the ISP
    #[serde(default)]
    pub domain: Option<String>,

    /// Reverse DNS hostnames
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hostnames: Vec<String>,

    /// Number of reports within the queried window
    #[serde(default)]
    pub total_reports: u32,

    /// Number of distinct reporters within the queried window
    #[serde(default)]
    pub num_distinct_users: u32,

    /// Timestamp of the latest report, as sent by the service
    #[serde(default)]
    pub last_reported_at: Option<String>,
}

impl ReputationRecord {
    /// Returns true if the address has any abuse signal at all
    #[must_use]
    pub const fn has_abuse(&self) -> bool {
        self.abuse_confidence_score > 0 || self.total_reports > 0
    }

    /// Whitelist flag, treating an absent value as not whitelisted
    #[must_use]
    pub fn whitelisted(&self) -> bool {
        self.is_whitelisted.unwrap_or(false)
    }

    /// Parse `last_reported_at` (RFC 3339)
    #[must_use]
    pub fn last_reported(&self) -> Option<DateTime<FixedOffset>> {
        self.last_reported_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": {
            "ipAddress": "118.25.6.39",
            "isPublic": true,
            "ipVersion": 4,
            "isWhitelisted": false,
            "abuseConfidenceScore": 100,
            "countryCode": "CN",
            "usageType": "Data Center/Web Hosting/Transit",
            "isp": "Tencent Cloud Computing (Beijing) Co. Ltd",
            "domain": "tencent.com",
            "hostnames": [],
            "isTor": false,
            "totalReports": 1,
            "numDistinctUsers": 1,
            "lastReportedAt": "2018-12-20T20:55:14+00:00"
        }
    }"#;

    fn record(score: u8, reports: u32) -> ReputationRecord {
        ReputationRecord {
            abuse_confidence_score: score,
            total_reports: reports,
            ..ReputationRecord::default()
        }
    }

    #[test]
    fn test_deserialize_check_response() {
        let resp: CheckResponse = serde_json::from_str(SAMPLE).unwrap();
        let data = resp.data;
        assert_eq!(data.ip_address, "118.25.6.39");
        assert!(data.is_public);
        assert_eq!(data.ip_version, 4);
        assert_eq!(data.is_whitelisted, Some(false));
        assert_eq!(data.abuse_confidence_score, 100);
        assert_eq!(data.country_code.as_deref(), Some("CN"));
        assert_eq!(data.domain.as_deref(), Some("tencent.com"));
        assert!(data.hostnames.is_empty());
        assert_eq!(data.total_reports, 1);
        assert_eq!(data.num_distinct_users, 1);
    }

    #[test]
    fn test_deserialize_nulls() {
        let json = r#"{"data": {
            "ipAddress": "127.0.0.1",
            "isPublic": false,
            "ipVersion": 4,
            "isWhitelisted": null,
            "abuseConfidenceScore": 0,
            "countryCode": null,
            "usageType": "Reserved",
            "isp": null,
            "domain": null,
            "hostnames": null,
            "totalReports": 0,
            "numDistinctUsers": 0,
            "lastReportedAt": null
        }}"#;
        let resp: CheckResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.is_whitelisted, None);
        assert!(!resp.data.whitelisted());
        assert!(resp.data.hostnames.is_empty());
        assert!(resp.data.last_reported().is_none());
        assert!(!resp.data.has_abuse());
    }

    #[test]
    fn test_has_abuse() {
        assert!(!record(0, 0).has_abuse());
        assert!(record(0, 3).has_abuse());
        assert!(record(15, 0).has_abuse());
        assert!(record(100, 42).has_abuse());
    }

    #[test]
    fn test_last_reported() {
        let resp: CheckResponse = serde_json::from_str(SAMPLE).unwrap();
        let ts = resp.data.last_reported().unwrap();
        assert_eq!(ts.timestamp(), 1_545_339_314);
    }
}
