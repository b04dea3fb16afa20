//! Migration history table reading

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::config::{AdapterConfig, VersionOrder};
use crate::connection::{Connection, Row};
use crate::error::{AdapterError, Result};
use crate::introspect::text_field;
use crate::quote::quote_table_name;

/// One applied migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionLogEntry {
    pub version: i64,
    pub migration_name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// 0 or 1
    pub breakpoint: u8,
}

/// Applied migrations keyed by version, in query order
pub type VersionLog = IndexMap<i64, VersionLogEntry>;

/// The history query for the configured ordering
///
/// ```
/// use snowdrift_migrations::{VersionOrder, version_log_sql};
///
/// assert_eq!(
///     version_log_sql("phinxlog", VersionOrder::Creation),
///     r#"select * from "phinxlog" order by "version" asc"#
/// );
/// ```
pub fn version_log_sql(table: &str, order: VersionOrder) -> String {
    let order_by = match order {
        VersionOrder::Creation => r#""version" asc"#,
        VersionOrder::Execution => r#""start_time" asc, "version" asc"#,
    };
    format!(
        "select * from {} order by {order_by}",
        quote_table_name(table)
    )
}

/// Normalize a breakpoint flag. `0`, `"0"`, `false`, `"false"`, `""` and
/// `null` are 0; anything else is 1.
pub fn normalize_breakpoint(value: &Value) -> u8 {
    let off = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"),
        Value::Array(_) | Value::Object(_) => false,
    };
    u8::from(!off)
}

fn parse_version(row: &Row) -> Result<i64> {
    let version = match row.get("version") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    version.ok_or_else(|| {
        AdapterError::Introspection(format!(
            "version log row has no integer version: {}",
            Value::Object(row.clone())
        ))
    })
}

/// Convert history rows, keeping their order
pub fn parse_version_log(rows: Vec<Row>) -> Result<VersionLog> {
    let mut log = VersionLog::with_capacity(rows.len());
    for row in rows {
        let version = parse_version(&row)?;
        let entry = VersionLogEntry {
            version,
            migration_name: text_field(&row, "migration_name"),
            start_time: text_field(&row, "start_time"),
            end_time: text_field(&row, "end_time"),
            breakpoint: normalize_breakpoint(row.get("breakpoint").unwrap_or(&Value::Null)),
        };
        log.insert(version, entry);
    }
    Ok(log)
}

/// Read the history table.
///
/// A failing query is treated as an empty history while simulating, since
/// the table may not exist before the first real run.
pub fn read_version_log<C: Connection>(conn: &mut C, config: &AdapterConfig) -> Result<VersionLog> {
    let order = config.require_version_order()?;
    let sql = version_log_sql(&config.migration_table, order);
    crate::trace::snowdrift_trace_statement!(&sql, 0usize);

    match conn.fetch_all(&sql) {
        Ok(rows) => parse_version_log(rows),
        Err(_) if conn.is_simulating() => Ok(VersionLog::new()),
        Err(e) => Err(e.with_sql(sql).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_breakpoint_normalization() {
        for off in [json!(0), json!("0"), json!(false), json!("false"), json!(""), json!(null)] {
            assert_eq!(normalize_breakpoint(&off), 0, "{off}");
        }
        for on in [json!(1), json!("1"), json!(true), json!("true"), json!("TRUE"), json!(2)] {
            assert_eq!(normalize_breakpoint(&on), 1, "{on}");
        }
    }

    #[test]
    fn test_execution_order_sql() {
        assert_eq!(
            version_log_sql("phinxlog", VersionOrder::Execution),
            r#"select * from "phinxlog" order by "start_time" asc, "version" asc"#
        );
    }

    #[test]
    fn test_rows_keep_query_order() {
        let rows: Vec<Row> = [
            json!({"version": 20240102000000_i64, "migration_name": "B", "breakpoint": "0"}),
            json!({"version": "20240101000000", "migration_name": "A", "breakpoint": true}),
        ]
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

        let log = parse_version_log(rows).unwrap();
        let versions: Vec<_> = log.keys().copied().collect();
        assert_eq!(versions, vec![20240102000000, 20240101000000]);
        assert_eq!(log[&20240101000000].breakpoint, 1);
        assert_eq!(log[&20240102000000].breakpoint, 0);
        assert_eq!(log[&20240101000000].migration_name.as_deref(), Some("A"));
    }

    #[test]
    fn test_missing_version_is_an_error() {
        let mut row = Row::new();
        row.insert("migration_name".into(), json!("A"));
        assert!(matches!(
            parse_version_log(vec![row]),
            Err(AdapterError::Introspection(_))
        ));
    }
}
