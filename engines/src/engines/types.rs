//! Shared types consumed by engine specs
//!
//! These records are owned by the metadata layer; engine specs only read
//! them, apart from the single `is_dttm` flag a spec may set on a new column.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Temporal column type used to pick a timestamp-literal rendering rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemporalType {
    Date,
    Datetime,
    Timestamp,
}

impl TemporalType {
    /// Parse a target-type tag, case-insensitively.
    ///
    /// Unrecognized tags return `None`; callers treat that as "not a
    /// temporal type" and fall back to their default literal rendering.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "DATE" => Some(Self::Date),
            "DATETIME" => Some(Self::Datetime),
            "TIMESTAMP" => Some(Self::Timestamp),
            _ => None,
        }
    }
}

impl fmt::Display for TemporalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalType::Date => write!(f, "DATE"),
            TemporalType::Datetime => write!(f, "DATETIME"),
            TemporalType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}

/// One table column as introspection sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    pub column_name: String,
    /// Whether the column holds timestamps (drives time filtering in the UI)
    #[serde(default)]
    pub is_dttm: bool,
}

impl TableColumn {
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            is_dttm: false,
        }
    }
}

/// Connection-relevant fields of a registered database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// JSON-encoded extra connection options, opaque until parsed
    #[serde(default)]
    pub extra: Option<String>,
    /// PEM server certificate to pin for TLS connections
    #[serde(default)]
    pub server_cert: Option<String>,
}

/// Feature flags consulted when engine specs are constructed
///
/// Flags are read at registry-build time rather than at crate load, so a
/// restart-free flag change takes effect on the next registry rebuild.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Advertise join support for Druid (requires a Druid version with
    /// SQL join support enabled)
    pub druid_joins: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporal_type_parse_case_insensitive() {
        assert_eq!(TemporalType::parse("date"), Some(TemporalType::Date));
        assert_eq!(TemporalType::parse("DATE"), Some(TemporalType::Date));
        assert_eq!(
            TemporalType::parse("DateTime"),
            Some(TemporalType::Datetime)
        );
        assert_eq!(
            TemporalType::parse("TIMESTAMP"),
            Some(TemporalType::Timestamp)
        );
    }

    #[test]
    fn test_temporal_type_parse_unknown() {
        assert_eq!(TemporalType::parse("VARCHAR"), None);
        assert_eq!(TemporalType::parse(""), None);
    }

    #[test]
    fn test_temporal_type_display() {
        assert_eq!(TemporalType::Date.to_string(), "DATE");
        assert_eq!(TemporalType::Datetime.to_string(), "DATETIME");
        assert_eq!(TemporalType::Timestamp.to_string(), "TIMESTAMP");
    }

    #[test]
    fn test_table_column_new_defaults() {
        let col = TableColumn::new("views");
        assert_eq!(col.column_name, "views");
        assert!(!col.is_dttm);
    }
}
