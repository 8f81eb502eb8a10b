//! Record normalization
//!
//! Turns raw record fields into typed indicators, and actor/tag strings into
//! their lookup form.

use super::indicator::{Indicator, IndicatorKind};
use super::record::ThreatRecord;

/// Normalize an actor name, alias or tag.
///
/// Trims surrounding whitespace and removes every space, so
/// `" Comment Panda "` becomes `"CommentPanda"`.
pub fn normalize_name(name: &str) -> String {
    name.trim().replace(' ', "")
}

/// Normalize a name, returning `None` when nothing is left
pub fn normalize_nonempty(name: &str) -> Option<String> {
    let normalized = normalize_name(name);
    (!normalized.is_empty()).then_some(normalized)
}

/// Extract the indicators carried by one record.
///
/// Order is sha256 hashes, then md5 hashes, then IP addresses, each in
/// field order; the first element is the record's primary indicator. Values
/// are taken verbatim and are not deduplicated.
pub fn normalize_record(record: &ThreatRecord) -> Vec<Indicator> {
    let mut indicators = Vec::with_capacity(record.indicator_count());

    let fields = [
        (&record.sha256_hashes, IndicatorKind::Sha256Hash),
        (&record.md5_hashes, IndicatorKind::Md5Hash),
        (&record.ip_addresses, IndicatorKind::IpAddress),
    ];

    for (values, kind) in fields {
        indicators.extend(
            values
                .iter()
                .map(|value| Indicator::new(value.as_str(), kind, record.created_time)),
        );
    }

    indicators
}
