//! Single-line textual dump of a [`ReputationRecord`].
//!
//! The dump is what ends up after `-->` in a report file:
//!
//! ```text
//! {IpAddress:1.2.3.4 IsPublic:true IpVersion:4 ... LastReportedAt:2024-01-01T00:00:00+00:00}
//! ```
//!
//! Values are written bare, so the parser splits on the known field names,
//! which always appear in [`DUMP_FIELDS`] order.

use super::ReputationRecord;
use crate::{AbuseError, Result};
use std::fmt;
use std::str::FromStr;

/// Field names of the dump, in output order
pub const DUMP_FIELDS: [&str; 13] = [
    "IpAddress",
    "IsPublic",
    "IpVersion",
    "IsWhitelisted",
    "AbuseConfidenceScore",
    "CountryCode",
    "UsageType",
    "Isp",
    "Domain",
    "Hostnames",
    "TotalReports",
    "NumDistinctUsers",
    "LastReportedAt",
];

impl fmt::Display for ReputationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();

        write!(
            f,
            "{{IpAddress:{} IsPublic:{} IpVersion:{} IsWhitelisted:{} AbuseConfidenceScore:{} \
             CountryCode:{} UsageType:{} Isp:{} Domain:{} Hostnames:[{}] TotalReports:{} \
             NumDistinctUsers:{} LastReportedAt:{}}}",
            self.ip_address,
            self.is_public,
            self.ip_version,
            self.whitelisted(),
            self.abuse_confidence_score,
            opt(&self.country_code),
            opt(&self.usage_type),
            opt(&self.isp),
            opt(&self.domain),
            self.hostnames.join(" "),
            self.total_reports,
            self.num_distinct_users,
            opt(&self.last_reported_at),
        )
    }
}

impl FromStr for ReputationRecord {
    type Err = AbuseError;

    fn from_str(s: &str) -> Result<Self> {
        let v = split_fields(s)?;

        Ok(Self {
            ip_address: v[0].to_string(),
            is_public: parse_value(DUMP_FIELDS[1], v[1])?,
            ip_version: parse_value(DUMP_FIELDS[2], v[2])?,
            is_whitelisted: Some(parse_value(DUMP_FIELDS[3], v[3])?),
            abuse_confidence_score: parse_value(DUMP_FIELDS[4], v[4])?,
            country_code: non_empty(v[5]),
            usage_type: non_empty(v[6]),
            isp: non_empty(v[7]),
            domain: non_empty(v[8]),
            hostnames: parse_list(v[9])?,
            total_reports: parse_value(DUMP_FIELDS[10], v[10])?,
            num_distinct_users: parse_value(DUMP_FIELDS[11], v[11])?,
            last_reported_at: non_empty(v[12]),
        })
    }
}

/// Split a dump into its raw values, one per entry of [`DUMP_FIELDS`].
fn split_fields(s: &str) -> Result<Vec<&str>> {
    let mut rest = s
        .trim()
        .strip_prefix('{')
        .and_then(|b| b.strip_suffix('}'))
        .ok_or_else(|| AbuseError::Parse("dump must be wrapped in braces".into()))?;

    let mut values = Vec::with_capacity(DUMP_FIELDS.len());
    for (i, name) in DUMP_FIELDS.iter().enumerate() {
        rest = rest
            .strip_prefix(*name)
            .and_then(|r| r.strip_prefix(':'))
            .ok_or_else(|| AbuseError::Parse(format!("expected field {name}")))?;

        let end = match DUMP_FIELDS.get(i + 1) {
            Some(next) => rest
                .find(&format!(" {next}:"))
                .ok_or_else(|| AbuseError::Parse(format!("missing field {next}")))?,
            None => rest.len(),
        };

        values.push(&rest[..end]);
        rest = &rest[end..];
        rest = rest.strip_prefix(' ').unwrap_or(rest);
    }

    Ok(values)
}

fn parse_value<T: FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| AbuseError::Parse(format!("bad value for {field}: {raw:?}")))
}

fn parse_list(raw: &str) -> Result<Vec<String>> {
    let inner = raw
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .ok_or_else(|| AbuseError::Parse(format!("bad value for Hostnames: {raw:?}")))?;
    Ok(inner.split_whitespace().map(String::from).collect())
}

fn non_empty(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReputationRecord {
        ReputationRecord {
            ip_address: "185.220.101.1".into(),
            is_public: true,
            ip_version: 4,
            is_whitelisted: Some(false),
            abuse_confidence_score: 100,
            country_code: Some("DE".into()),
            usage_type: Some("Data Center/Web Hosting/Transit".into()),
            isp: Some("Zwiebelfreunde e.V.".into()),
            domain: Some("torproject.org".into()),
            hostnames: vec!["tor-exit-1.example.net".into(), "relay.example.net".into()],
            total_reports: 3127,
            num_distinct_users: 412,
            last_reported_at: Some("2024-05-01T10:11:12+00:00".into()),
        }
    }

    #[test]
    fn test_display_format() {
        let line = sample().to_string();
        assert_eq!(
            line,
            "{IpAddress:185.220.101.1 IsPublic:true IpVersion:4 IsWhitelisted:false \
             AbuseConfidenceScore:100 CountryCode:DE UsageType:Data Center/Web Hosting/Transit \
             Isp:Zwiebelfreunde e.V. Domain:torproject.org \
             Hostnames:[tor-exit-1.example.net relay.example.net] TotalReports:3127 \
             NumDistinctUsers:412 LastReportedAt:2024-05-01T10:11:12+00:00}"
        );
    }

    #[test]
    fn test_parse_back() {
        let original = sample();
        let parsed: ReputationRecord = original.to_string().parse().unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_empty_optionals() {
        let record = ReputationRecord {
            ip_address: "10.0.0.1".into(),
            ip_version: 4,
            total_reports: 2,
            ..ReputationRecord::default()
        };
        let parsed: ReputationRecord = record.to_string().parse().unwrap();
        assert_eq!(parsed.country_code, None);
        assert_eq!(parsed.isp, None);
        assert!(parsed.hostnames.is_empty());
        assert_eq!(parsed.total_reports, 2);
        assert_eq!(parsed.is_whitelisted, Some(false));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not a dump".parse::<ReputationRecord>().is_err());
        assert!("{IpAddress:1.2.3.4}".parse::<ReputationRecord>().is_err());

        let bad_score = sample()
            .to_string()
            .replace("AbuseConfidenceScore:100", "AbuseConfidenceScore:lots");
        assert!(bad_score.parse::<ReputationRecord>().is_err());
    }
}
