//! Indicator entities and the per-run indicator table

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of observable an indicator carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Sha256Hash,
    Md5Hash,
    IpAddress,
}

impl IndicatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::Sha256Hash => "sha256 hash",
            IndicatorKind::Md5Hash => "md5 hash",
            IndicatorKind::IpAddress => "ip address",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An indicator of compromise.
///
/// Identity is `value`, compared exactly (no case folding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub value: String,
    pub kind: IndicatorKind,
    /// Creation time of the first record that carried this value
    pub first_seen: Option<DateTime<Utc>>,
}

impl Indicator {
    pub fn new(
        value: impl Into<String>,
        kind: IndicatorKind,
        first_seen: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            value: value.into(),
            kind,
            first_seen,
        }
    }
}

/// Unique indicator counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndicatorBreakdown {
    pub sha256_hashes: usize,
    pub md5_hashes: usize,
    pub ip_addresses: usize,
}

/// Indicators keyed by value, in first-seen order.
///
/// The first insertion of a value wins; later insertions of the same value
/// are ignored, whatever their kind or timestamp.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndicatorTable {
    entries: IndexMap<String, Indicator>,
}

impl IndicatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an indicator, returning true if its value was new
    pub fn insert(&mut self, indicator: Indicator) -> bool {
        if self.entries.contains_key(&indicator.value) {
            return false;
        }
        self.entries.insert(indicator.value.clone(), indicator);
        true
    }

    pub fn get(&self, value: &str) -> Option<&Indicator> {
        self.entries.get(value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.entries.values()
    }

    /// Count of indicators per kind
    pub fn count_by_kind(&self, kind: IndicatorKind) -> usize {
        self.entries.values().filter(|i| i.kind == kind).count()
    }

    pub fn breakdown(&self) -> IndicatorBreakdown {
        IndicatorBreakdown {
            sha256_hashes: self.count_by_kind(IndicatorKind::Sha256Hash),
            md5_hashes: self.count_by_kind(IndicatorKind::Md5Hash),
            ip_addresses: self.count_by_kind(IndicatorKind::IpAddress),
        }
    }
}
