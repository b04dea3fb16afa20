//! Snowflake metadata introspection
//!
//! Reads the output of the `SHOW` command family back into schema value
//! objects. `SHOW COLUMNS` reports each column's type as a JSON document:
//!
//! ```text
//! {"type":"FIXED","precision":38,"scale":0,"nullable":true}
//! {"type":"TEXT","length":16777216,"byteLength":16777216,"nullable":false,"fixed":false}
//! {"type":"TIMESTAMP_NTZ","precision":0,"scale":9,"nullable":true}
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use snowdrift_types::{CanonicalType, TypeFamily};

use crate::connection::Row;
use crate::error::{AdapterError, Result};
use crate::grammar::{parse_bool_token, parse_null_flag, unquote_string_literal};
use crate::quote::{quote_string, quote_table_name};
use crate::schema::{Column, ColumnDefault, Identity};

// =============================================================================
// Queries
// =============================================================================

pub fn show_columns_sql(table: &str) -> String {
    format!("show columns in table {}", quote_table_name(table))
}

pub fn show_tables_sql(table: &str) -> String {
    format!("show tables like {}", quote_string(table))
}

pub fn show_databases_sql(database: &str) -> String {
    format!("show databases like {}", quote_string(database))
}

pub fn show_unique_keys_sql(table: &str) -> String {
    format!("show unique keys in table {}", quote_table_name(table))
}

pub fn show_primary_keys_sql(table: &str) -> String {
    format!("show primary keys in table {}", quote_table_name(table))
}

pub fn show_imported_keys_sql(table: &str) -> String {
    format!("show imported keys in table {}", quote_table_name(table))
}

// =============================================================================
// Columns
// =============================================================================

/// Decoded `data_type` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TypeDescriptor {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub collation: Option<String>,
}

impl TypeDescriptor {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            AdapterError::Introspection(format!("invalid data_type descriptor {json:?}: {e}"))
        })
    }
}

/// One `SHOW COLUMNS` row, with the fields the adapter reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawColumnInfo {
    pub column_name: String,
    pub data_type: String,
    pub null_flag: Option<String>,
    pub default: Option<String>,
    pub comment: Option<String>,
    pub autoincrement: Option<String>,
}

impl RawColumnInfo {
    pub fn from_row(row: &Row) -> Result<Self> {
        let column_name = text_field(row, "column_name").ok_or_else(|| {
            AdapterError::Introspection("column row is missing column_name".to_string())
        })?;
        let data_type = text_field(row, "data_type").ok_or_else(|| {
            AdapterError::Introspection(format!("column '{column_name}' is missing data_type"))
        })?;
        Ok(Self {
            column_name,
            data_type,
            null_flag: text_field(row, "null?"),
            default: text_field(row, "default"),
            comment: text_field(row, "comment").filter(|c| !c.is_empty()),
            autoincrement: text_field(row, "autoincrement").filter(|a| !a.trim().is_empty()),
        })
    }
}

/// Read a row field as text. Missing and `null` fields are `None`.
pub(crate) fn text_field(row: &Row, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse `SHOW COLUMNS` rows into columns
pub fn parse_columns(rows: &[Row]) -> Result<Vec<Column>> {
    rows.iter()
        .map(|row| RawColumnInfo::from_row(row).and_then(|raw| process_column(&raw)))
        .collect()
}

/// Rebuild a column from its raw metadata
pub fn process_column(raw: &RawColumnInfo) -> Result<Column> {
    let descriptor = TypeDescriptor::parse(&raw.data_type)?;
    let ty = CanonicalType::from_introspected(&descriptor.type_tag)?;

    let mut column = Column::new(raw.column_name.clone(), ty.as_str());
    match ty.family() {
        TypeFamily::Numeric => {
            column.precision = descriptor.precision;
            column.scale = descriptor.scale;
        }
        // Fractional seconds are reported as the scale of temporal types
        TypeFamily::Time | TypeFamily::Timestamp => column.precision = descriptor.scale,
        TypeFamily::String | TypeFamily::Binary => {
            column.limit = descriptor.length;
            column.collation = descriptor.collation.clone();
        }
        _ => {}
    }

    column.nullable = descriptor
        .nullable
        .or_else(|| raw.null_flag.as_deref().and_then(parse_null_flag))
        .unwrap_or(true);
    column.default = raw.default.as_deref().and_then(coerce_default);
    column.identity = raw.autoincrement.as_deref().map(parse_identity);
    column.comment = raw.comment.clone();

    Ok(column)
}

/// Coerce the raw `default` text Snowflake reports.
///
/// Empty text means no default. Boolean tokens become booleans and quoted
/// literals lose their quotes. Everything else is kept as an expression.
pub fn coerce_default(raw: &str) -> Option<ColumnDefault> {
    if raw.is_empty() {
        return None;
    }
    if let Some(b) = parse_bool_token(raw) {
        return Some(ColumnDefault::Literal(Value::Bool(b)));
    }
    if let Some(s) = unquote_string_literal(raw) {
        return Some(ColumnDefault::Literal(Value::String(s)));
    }
    Some(ColumnDefault::Expression(raw.to_string()))
}

static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("INTEGER_PATTERN: invalid regex pattern"));

/// Extract seed and increment from an autoincrement descriptor such as
/// `IDENTITY START 1 INCREMENT 1 ORDER`
pub fn parse_identity(descriptor: &str) -> Identity {
    let mut numbers = INTEGER_PATTERN
        .find_iter(descriptor)
        .filter_map(|m| m.as_str().parse::<i64>().ok());
    Identity {
        seed: numbers.next(),
        increment: numbers.next(),
    }
}

// =============================================================================
// Key constraints
// =============================================================================

/// Group `SHOW ... KEYS` rows by constraint name, with each constraint's
/// columns ordered by `key_sequence`.
pub fn group_key_columns(
    rows: &[Row],
    name_field: &str,
    column_field: &str,
) -> Result<IndexMap<String, Vec<String>>> {
    let mut grouped: IndexMap<String, Vec<(i64, String)>> = IndexMap::new();
    for row in rows {
        let name = text_field(row, name_field).unwrap_or_default();
        let column = text_field(row, column_field).ok_or_else(|| {
            AdapterError::Introspection(format!("key row is missing {column_field}"))
        })?;
        let sequence = text_field(row, "key_sequence")
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(0);
        grouped.entry(name).or_default().push((sequence, column));
    }

    Ok(grouped
        .into_iter()
        .map(|(name, mut columns)| {
            columns.sort_by_key(|(sequence, _)| *sequence);
            (name, columns.into_iter().map(|(_, c)| c).collect())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_number_column() {
        let rows = vec![row(json!({
            "column_name": "amount",
            "data_type": r#"{"type":"FIXED","precision":9,"scale":5,"nullable":true}"#,
            "null?": "true",
            "default": "",
            "comment": "",
            "autoincrement": ""
        }))];
        let columns = parse_columns(&rows).unwrap();
        assert_eq!(columns.len(), 1);
        let c = &columns[0];
        assert_eq!(c.sql_type, "number");
        assert_eq!((c.precision, c.scale), (Some(9), Some(5)));
        assert!(c.nullable);
        assert!(c.default.is_none());
        assert!(c.identity.is_none());
        assert!(c.comment.is_none());
    }

    #[test]
    fn test_text_column_falls_back_to_null_flag() {
        let raw = RawColumnInfo {
            column_name: "email".into(),
            data_type: r#"{"type":"TEXT","length":42,"byteLength":168}"#.into(),
            null_flag: Some("false".into()),
            comment: Some("login".into()),
            ..Default::default()
        };
        let c = process_column(&raw).unwrap();
        assert_eq!(c.sql_type, "varchar");
        assert_eq!(c.limit, Some(42));
        assert!(!c.nullable);
        assert_eq!(c.comment.as_deref(), Some("login"));
    }

    #[test]
    fn test_describe_style_null_flag() {
        let raw = RawColumnInfo {
            column_name: "code".into(),
            data_type: r#"{"type":"TEXT","length":8}"#.into(),
            null_flag: Some("N".into()),
            ..Default::default()
        };
        assert!(!process_column(&raw).unwrap().nullable);

        let raw = RawColumnInfo {
            null_flag: Some("Y".into()),
            ..raw
        };
        assert!(process_column(&raw).unwrap().nullable);
    }

    #[test]
    fn test_timestamp_precision_comes_from_scale() {
        let raw = RawColumnInfo {
            column_name: "created_at".into(),
            data_type: r#"{"type":"TIMESTAMP_LTZ","precision":0,"scale":3,"nullable":true}"#
                .into(),
            ..Default::default()
        };
        let c = process_column(&raw).unwrap();
        assert_eq!(c.sql_type, "timestamp_ltz");
        assert_eq!(c.precision, Some(3));
        assert_eq!(c.scale, None);
    }

    #[test]
    fn test_identity_extraction() {
        assert_eq!(
            parse_identity("IDENTITY START 111 INCREMENT 222 ORDER"),
            Identity {
                seed: Some(111),
                increment: Some(222)
            }
        );
        assert_eq!(
            parse_identity("START -5 INCREMENT -1"),
            Identity {
                seed: Some(-5),
                increment: Some(-1)
            }
        );
        assert_eq!(parse_identity("IDENTITY"), Identity::default());
    }

    #[test]
    fn test_default_coercion() {
        assert_eq!(coerce_default(""), None);
        assert_eq!(
            coerce_default("TRUE"),
            Some(ColumnDefault::Literal(json!(true)))
        );
        assert_eq!(
            coerce_default("'it''s'"),
            Some(ColumnDefault::Literal(json!("it's")))
        );
        assert_eq!(
            coerce_default("CURRENT_TIMESTAMP()"),
            Some(ColumnDefault::Expression("CURRENT_TIMESTAMP()".into()))
        );
        assert_eq!(
            coerce_default("DB.PUBLIC.SEQ1.NEXTVAL"),
            Some(ColumnDefault::Expression("DB.PUBLIC.SEQ1.NEXTVAL".into()))
        );
    }

    #[test]
    fn test_bad_descriptor_is_an_error() {
        let raw = RawColumnInfo {
            column_name: "x".into(),
            data_type: "not json".into(),
            ..Default::default()
        };
        assert!(matches!(
            process_column(&raw),
            Err(AdapterError::Introspection(_))
        ));
    }

    #[test]
    fn test_unknown_type_tag_is_an_error() {
        let raw = RawColumnInfo {
            column_name: "x".into(),
            data_type: r#"{"type":"VECTOR"}"#.into(),
            ..Default::default()
        };
        assert!(matches!(
            process_column(&raw),
            Err(AdapterError::UnknownType(_))
        ));
    }

    #[test]
    fn test_group_key_columns_orders_by_sequence() {
        let rows = vec![
            row(json!({"constraint_name": "uq_ab", "column_name": "b", "key_sequence": 2})),
            row(json!({"constraint_name": "uq_c", "column_name": "c", "key_sequence": 1})),
            row(json!({"constraint_name": "uq_ab", "column_name": "a", "key_sequence": 1})),
        ];
        let grouped = group_key_columns(&rows, "constraint_name", "column_name").unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["uq_ab"], vec!["a".to_string(), "b".to_string()]);
        assert_eq!(grouped["uq_c"], vec!["c".to_string()]);
    }
}
