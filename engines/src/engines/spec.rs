//! Engine spec trait for datastore-specific SQL and connection handling
//!
//! This trait defines the seam between the generic query builder and each
//! supported datastore. Default methods supply the base behavior; a concrete
//! spec overrides only what its engine does differently.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::engines::types::{DatabaseInfo, TableColumn};
use crate::error::EngineError;

/// Static table mapping a time-grain code to a SQL template
///
/// The `None` key means "no truncation". Templates contain a `{col}`
/// placeholder the caller substitutes with a column reference.
pub type TimeGrainTable = &'static [(Option<&'static str>, &'static str)];

/// Base table: only the untruncated passthrough grain
const BASE_TIME_GRAINS: TimeGrainTable = &[(None, "{col}")];

/// Parse a database `extra` payload into a JSON object.
///
/// Empty or whitespace-only input is treated as `{}`. Anything that is not
/// a JSON object fails with [`EngineError::InvalidExtra`].
pub fn parse_extra(extra: &str) -> Result<Map<String, Value>, EngineError> {
    let text = if extra.trim().is_empty() { "{}" } else { extra };
    Ok(serde_json::from_str(text)?)
}

/// Datastore-specific translation layer consulted at query-build time
///
/// Every operation is either a pure function over immutable inputs or a
/// bounded mutation of a single caller-owned field, so specs are safe to
/// share across threads.
pub trait EngineSpec: Send + Sync {
    /// Engine identifier used for registry lookup (e.g. "druid")
    fn engine(&self) -> &'static str;

    /// Human-readable engine name (e.g. "Apache Druid")
    fn engine_name(&self) -> &'static str;

    /// Whether the engine supports joins
    fn allows_joins(&self) -> bool {
        true
    }

    /// Whether the engine supports subqueries
    fn allows_subqueries(&self) -> bool {
        true
    }

    /// Time-grain templates supported by this engine
    fn time_grain_expressions(&self) -> TimeGrainTable {
        BASE_TIME_GRAINS
    }

    /// Look up the template for a grain code.
    ///
    /// Returns `None` for grains the engine does not support; the caller
    /// decides whether that is an error or a fallback.
    fn lookup_time_grain(&self, grain: Option<&str>) -> Option<&'static str> {
        self.time_grain_expressions()
            .iter()
            .find(|(code, _)| *code == grain)
            .map(|(_, template)| *template)
    }

    /// Render the time-grain expression for a column reference
    fn time_grain_sql(&self, grain: Option<&str>, col: &str) -> Option<String> {
        self.lookup_time_grain(grain)
            .map(|template| template.replace("{col}", col))
    }

    /// Hook invoked when a column is first introspected.
    ///
    /// Specs may flip `is_dttm` on columns their engine reserves for
    /// timestamps. Default is a no-op.
    fn alter_new_column(&self, _col: &mut TableColumn) {}

    /// Derive driver connection parameters from the database record.
    ///
    /// The base behavior parses the JSON `extra` payload and returns it
    /// unchanged. Engines that need to inject connection arguments (TLS,
    /// schemes) override this and merge into the parsed mapping.
    fn get_extra_params(&self, database: &DatabaseInfo) -> Result<Map<String, Value>, EngineError> {
        parse_extra(database.extra.as_deref().unwrap_or("{}"))
    }

    /// Render a timestamp value as an engine-native SQL literal.
    ///
    /// `target_type` is the column's type tag; unrecognized tags return
    /// `None` and the caller falls back to its default rendering.
    fn convert_dttm(&self, _target_type: &str, _dttm: NaiveDateTime) -> Option<String> {
        None
    }

    /// Template converting a seconds-since-epoch column to a timestamp
    fn epoch_to_dttm(&self) -> Option<&'static str> {
        None
    }

    /// Template converting a milliseconds-since-epoch column to a timestamp
    fn epoch_ms_to_dttm(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct BareSpec;

    impl EngineSpec for BareSpec {
        fn engine(&self) -> &'static str {
            "bare"
        }

        fn engine_name(&self) -> &'static str {
            "Bare Engine"
        }
    }

    #[test]
    fn test_default_capabilities() {
        let spec = BareSpec;
        assert!(spec.allows_joins());
        assert!(spec.allows_subqueries());
    }

    #[test]
    fn test_default_grain_table_passthrough_only() {
        let spec = BareSpec;
        assert_eq!(spec.lookup_time_grain(None), Some("{col}"));
        assert_eq!(spec.lookup_time_grain(Some("PT1H")), None);
    }

    #[test]
    fn test_time_grain_sql_substitutes_column() {
        let spec = BareSpec;
        assert_eq!(
            spec.time_grain_sql(None, "created_at"),
            Some("created_at".to_string())
        );
        assert_eq!(spec.time_grain_sql(Some("P1D"), "created_at"), None);
    }

    #[test]
    fn test_default_convert_dttm_is_none() {
        let spec = BareSpec;
        let dttm = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(12, 30, 45)
            .unwrap();
        assert_eq!(spec.convert_dttm("TIMESTAMP", dttm), None);
    }

    #[test]
    fn test_default_epoch_templates_are_none() {
        let spec = BareSpec;
        assert_eq!(spec.epoch_to_dttm(), None);
        assert_eq!(spec.epoch_ms_to_dttm(), None);
    }

    #[test]
    fn test_default_alter_new_column_is_noop() {
        let spec = BareSpec;
        let mut col = crate::engines::types::TableColumn::new("__time");
        spec.alter_new_column(&mut col);
        assert!(!col.is_dttm);
    }

    #[test]
    fn test_parse_extra_empty_inputs() {
        assert!(parse_extra("").unwrap().is_empty());
        assert!(parse_extra("   ").unwrap().is_empty());
        assert!(parse_extra("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_extra_preserves_keys() {
        let extra = parse_extra(r#"{"metadata_params": {"foo": 1}, "version": "28"}"#).unwrap();
        assert_eq!(extra.len(), 2);
        assert_eq!(extra["version"], "28");
    }

    #[test]
    fn test_parse_extra_rejects_malformed_json() {
        assert!(matches!(
            parse_extra("{"),
            Err(EngineError::InvalidExtra(_))
        ));
    }

    #[test]
    fn test_parse_extra_rejects_non_object() {
        assert!(matches!(
            parse_extra("[1, 2]"),
            Err(EngineError::InvalidExtra(_))
        ));
    }

    #[test]
    fn test_default_get_extra_params() {
        let spec = BareSpec;
        let db = DatabaseInfo {
            extra: Some(r#"{"engine_params": {"pool_size": 5}}"#.to_string()),
            server_cert: None,
        };
        let extra = spec.get_extra_params(&db).unwrap();
        assert_eq!(extra["engine_params"]["pool_size"], 5);
    }
}
