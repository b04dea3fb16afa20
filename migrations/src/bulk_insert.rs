//! Multi-row INSERT building
//!
//! Rows are inserted with a single statement. Normally it is prepared with
//! positional binds (`:1`, `:2`, ...); while simulating the values are
//! rendered inline so the statement can be shown as text.

use serde_json::Value;

use crate::connection::Row;
use crate::error::{AdapterError, Result};
use crate::quote::{quote_column_list, quote_string, quote_table_name};

/// A prepared insert and its bind values, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Column names shared by every row, in the first row's key order
fn shared_columns<'a>(table: &str, rows: &'a [Row]) -> Result<Vec<&'a str>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    if columns.is_empty() {
        return Err(AdapterError::InvalidArgument(format!(
            "cannot insert a row without columns into '{table}'"
        )));
    }
    for (i, row) in rows.iter().enumerate().skip(1) {
        if row.len() != columns.len() || !columns.iter().all(|c| row.contains_key(*c)) {
            return Err(AdapterError::InvalidArgument(format!(
                "row {i} inserted into '{table}' does not have the same columns as the first row"
            )));
        }
    }
    Ok(columns)
}

fn insert_prefix(table: &str, columns: &[&str]) -> String {
    format!(
        "insert into {} ({}) values ",
        quote_table_name(table),
        quote_column_list(columns)
    )
}

/// Booleans are bound as the strings `TRUE` / `FALSE`
pub fn bind_value(value: &Value) -> Value {
    match value {
        Value::Bool(true) => Value::String("TRUE".to_string()),
        Value::Bool(false) => Value::String("FALSE".to_string()),
        other => other.clone(),
    }
}

/// Render a value as an inline SQL literal
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_string(s),
        other => quote_string(&other.to_string()),
    }
}

impl InsertStatement {
    /// Build the prepared form. Returns `None` for an empty row set.
    ///
    /// ```
    /// use serde_json::json;
    /// use snowdrift_migrations::InsertStatement;
    ///
    /// let row = json!({"a": 1, "b": true}).as_object().cloned().unwrap();
    /// let stmt = InsertStatement::prepared("t", &[row.clone(), row]).unwrap().unwrap();
    /// assert_eq!(stmt.sql, r#"insert into "t" ("a", "b") values (:1, :2), (:3, :4)"#);
    /// assert_eq!(stmt.params[1], json!("TRUE"));
    /// ```
    pub fn prepared(table: &str, rows: &[Row]) -> Result<Option<Self>> {
        let columns = shared_columns(table, rows)?;
        if columns.is_empty() {
            return Ok(None);
        }

        let mut params = Vec::with_capacity(rows.len() * columns.len());
        let groups: Vec<String> = rows
            .iter()
            .map(|row| {
                let placeholders: Vec<String> = columns
                    .iter()
                    .map(|column| {
                        params.push(bind_value(row.get(*column).unwrap_or(&Value::Null)));
                        format!(":{}", params.len())
                    })
                    .collect();
                format!("({})", placeholders.join(", "))
            })
            .collect();

        Ok(Some(Self {
            sql: format!("{}{}", insert_prefix(table, &columns), groups.join(", ")),
            params,
        }))
    }

    /// Build the statement with every value rendered inline
    pub fn inline(table: &str, rows: &[Row]) -> Result<Option<String>> {
        let columns = shared_columns(table, rows)?;
        if columns.is_empty() {
            return Ok(None);
        }

        let groups: Vec<String> = rows
            .iter()
            .map(|row| {
                let values: Vec<String> = columns
                    .iter()
                    .map(|column| literal(row.get(*column).unwrap_or(&Value::Null)))
                    .collect();
                format!("({})", values.join(", "))
            })
            .collect();

        Ok(Some(format!(
            "{}{};",
            insert_prefix(table, &columns),
            groups.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_inline_literals() {
        let rows = vec![row(json!({"a": 1, "b": "it's", "c": null, "d": false}))];
        assert_eq!(
            InsertStatement::inline("t", &rows).unwrap().unwrap(),
            r#"insert into "t" ("a", "b", "c", "d") values (1, 'it''s', null, false);"#
        );
    }

    #[test]
    fn test_empty_rows() {
        assert!(InsertStatement::prepared("t", &[]).unwrap().is_none());
        assert!(InsertStatement::inline("t", &[]).unwrap().is_none());
    }

    #[test]
    fn test_mismatched_rows_are_rejected() {
        let rows = vec![row(json!({"a": 1, "b": 2})), row(json!({"a": 1, "c": 2}))];
        assert!(matches!(
            InsertStatement::prepared("t", &rows),
            Err(AdapterError::InvalidArgument(_))
        ));
        let rows = vec![row(json!({"a": 1})), row(json!({"a": 1, "b": 2}))];
        assert!(InsertStatement::inline("t", &rows).is_err());
    }

    #[test]
    fn test_placeholders_are_distinct() {
        let rows = vec![row(json!({"x": 1})), row(json!({"x": 2})), row(json!({"x": 3}))];
        let stmt = InsertStatement::prepared("t", &rows).unwrap().unwrap();
        assert_eq!(stmt.sql, r#"insert into "t" ("x") values (:1), (:2), (:3)"#);
        assert_eq!(stmt.params, vec![json!(1), json!(2), json!(3)]);
    }
}
