//! Input records consumed by the correlation core
//!
//! Field names accept both the canonical names and the ones used by the
//! upstream feed exports (`ips`, `apt_name`, `targets`, `Common Name`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Offset-less layouts seen in feed exports, read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a record timestamp.
///
/// Accepts RFC 3339 (offset applied), naive `T`- or space-separated
/// date-times and bare dates. Naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// An unreadable `created_time` drops the timestamp, never the record
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => {
            let ts = parse_timestamp(&raw);
            if ts.is_none() {
                warn!("Unrecognised created_time {:?}, ignoring it", raw);
            }
            ts
        }
        Some(other) => {
            warn!("Non-string created_time {}, ignoring it", other);
            None
        }
    };
    Ok(parsed)
}

/// One threat-intelligence record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatRecord {
    #[serde(default)]
    pub sha256_hashes: Vec<String>,

    #[serde(default)]
    pub md5_hashes: Vec<String>,

    #[serde(default, alias = "ips")]
    pub ip_addresses: Vec<String>,

    /// `None` when the field is absent; treated the same as no tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_time: Option<DateTime<Utc>>,
}

impl ThreatRecord {
    /// Tags on the record, empty when the field was absent
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn indicator_count(&self) -> usize {
        self.sha256_hashes.len() + self.md5_hashes.len() + self.ip_addresses.len()
    }
}

/// One actor registry entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorEntry {
    #[serde(default, alias = "apt_name")]
    pub canonical_name: Option<String>,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default, alias = "targets")]
    pub countries: Vec<String>,
}

impl ActorEntry {
    pub fn new(
        canonical_name: impl Into<String>,
        aliases: impl IntoIterator<Item = impl Into<String>>,
        countries: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            canonical_name: Some(canonical_name.into()),
            aliases: aliases.into_iter().map(Into::into).collect(),
            countries: countries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Actor group from a group catalogue (name plus known aliases)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorGroup {
    #[serde(alias = "apt_name")]
    pub name: String,

    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Targeting data for one actor, as extracted from an operations database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetingRow {
    #[serde(alias = "Common Name")]
    pub common_name: String,

    #[serde(default)]
    pub countries: Vec<String>,
}
