//! Apache Druid engine spec

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::engines::spec::{EngineSpec, TimeGrainTable, parse_extra};
use crate::engines::types::{DatabaseInfo, FeatureFlags, TableColumn, TemporalType};
use crate::error::EngineError;
use crate::utils::ssl::create_ssl_cert_file;

/// Reserved Druid column that always holds the row timestamp
const TIME_COLUMN: &str = "__time";

/// Druid SQL time-grain templates
///
/// Grains without a native `FLOOR` unit go through `TIME_FLOOR` with an
/// ISO-8601 period. The two trailing entries realign weeks to Saturday and
/// Sunday starts.
const TIME_GRAIN_EXPRESSIONS: TimeGrainTable = &[
    (None, "{col}"),
    (Some("PT1S"), "FLOOR({col} TO SECOND)"),
    (Some("PT5S"), "TIME_FLOOR({col}, 'PT5S')"),
    (Some("PT30S"), "TIME_FLOOR({col}, 'PT30S')"),
    (Some("PT1M"), "FLOOR({col} TO MINUTE)"),
    (Some("PT5M"), "TIME_FLOOR({col}, 'PT5M')"),
    (Some("PT10M"), "TIME_FLOOR({col}, 'PT10M')"),
    (Some("PT15M"), "TIME_FLOOR({col}, 'PT15M')"),
    (Some("PT0.5H"), "TIME_FLOOR({col}, 'PT30M')"),
    (Some("PT1H"), "FLOOR({col} TO HOUR)"),
    (Some("PT6H"), "TIME_FLOOR({col}, 'PT6H')"),
    (Some("P1D"), "FLOOR({col} TO DAY)"),
    (Some("P1W"), "FLOOR({col} TO WEEK)"),
    (Some("P1M"), "FLOOR({col} TO MONTH)"),
    (Some("P0.25Y"), "FLOOR({col} TO QUARTER)"),
    (Some("P1Y"), "FLOOR({col} TO YEAR)"),
    (
        Some("P1W/1970-01-03T00:00:00Z"),
        "TIMESTAMPADD(DAY, 5, FLOOR(TIMESTAMPADD(DAY, 1, {col}) TO WEEK))",
    ),
    (
        Some("1969-12-28T00:00:00Z/P1W"),
        "TIMESTAMPADD(DAY, -1, FLOOR(TIMESTAMPADD(DAY, 1, {col}) TO WEEK))",
    ),
];

/// Engine spec for Druid SQL
pub struct DruidEngineSpec {
    allows_joins: bool,
}

impl DruidEngineSpec {
    /// Build the spec, reading capability flags now rather than at load
    pub fn new(flags: &FeatureFlags) -> Self {
        Self {
            allows_joins: flags.druid_joins,
        }
    }
}

impl EngineSpec for DruidEngineSpec {
    fn engine(&self) -> &'static str {
        "druid"
    }

    fn engine_name(&self) -> &'static str {
        "Apache Druid"
    }

    fn allows_joins(&self) -> bool {
        self.allows_joins
    }

    fn time_grain_expressions(&self) -> TimeGrainTable {
        TIME_GRAIN_EXPRESSIONS
    }

    fn alter_new_column(&self, col: &mut TableColumn) {
        if col.column_name == TIME_COLUMN {
            col.is_dttm = true;
        }
    }

    /// For Druid, the path to a SSL certificate is placed in `connect_args`.
    fn get_extra_params(&self, database: &DatabaseInfo) -> Result<Map<String, Value>, EngineError> {
        let mut extra = parse_extra(database.extra.as_deref().unwrap_or("{}"))?;

        if let Some(cert) = database.server_cert.as_deref() {
            let path = create_ssl_cert_file(cert)?;

            let mut engine_params = match extra.remove("engine_params") {
                Some(Value::Object(obj)) => obj,
                _ => Map::new(),
            };
            let mut connect_args = match engine_params.remove("connect_args") {
                Some(Value::Object(obj)) => obj,
                _ => Map::new(),
            };

            connect_args.insert("scheme".to_string(), Value::String("https".to_string()));
            connect_args.insert(
                "ssl_verify_cert".to_string(),
                Value::String(path.to_string_lossy().into_owned()),
            );
            engine_params.insert("connect_args".to_string(), Value::Object(connect_args));
            extra.insert("engine_params".to_string(), Value::Object(engine_params));
        }

        Ok(extra)
    }

    fn convert_dttm(&self, target_type: &str, dttm: NaiveDateTime) -> Option<String> {
        match TemporalType::parse(target_type)? {
            TemporalType::Date => Some(format!(
                "CAST(TIME_PARSE('{}') AS DATE)",
                dttm.format("%Y-%m-%d")
            )),
            // Second precision; any sub-second fraction is dropped
            TemporalType::Datetime | TemporalType::Timestamp => {
                Some(format!("TIME_PARSE('{}')", dttm.format("%Y-%m-%dT%H:%M:%S")))
            }
        }
    }

    fn epoch_to_dttm(&self) -> Option<&'static str> {
        Some("MILLIS_TO_TIMESTAMP({col} * 1000)")
    }

    fn epoch_ms_to_dttm(&self) -> Option<&'static str> {
        Some("MILLIS_TO_TIMESTAMP({col})")
    }
}
