//! Shared test fixtures

#![allow(dead_code)]

use std::collections::HashMap;

use serde_json::{Value, json};
use snowdrift_migrations::{Connection, ConnectionError, Row};

/// In-memory connection that records everything it is asked to do and
/// answers queries from canned rows. Unknown queries return no rows.
#[derive(Debug, Default)]
pub struct MockConnection {
    pub executed: Vec<String>,
    pub prepared: Vec<(String, Vec<Value>)>,
    pub queries: Vec<String>,
    pub output: Vec<String>,
    pub simulating: bool,
    responses: HashMap<String, Vec<Row>>,
    failures: HashMap<String, String>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn simulating() -> Self {
        Self {
            simulating: true,
            ..Self::default()
        }
    }

    /// Answer `sql` with `rows`
    pub fn respond(mut self, sql: impl Into<String>, rows: Vec<Row>) -> Self {
        self.responses.insert(sql.into(), rows);
        self
    }

    /// Fail `sql` with `message`
    pub fn fail(mut self, sql: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(sql.into(), message.into());
        self
    }
}

impl Connection for MockConnection {
    fn execute(&mut self, sql: &str) -> Result<u64, ConnectionError> {
        if let Some(message) = self.failures.get(sql) {
            return Err(ConnectionError::new(message.clone()));
        }
        self.executed.push(sql.to_string());
        Ok(0)
    }

    fn fetch_all(&mut self, sql: &str) -> Result<Vec<Row>, ConnectionError> {
        self.queries.push(sql.to_string());
        if let Some(message) = self.failures.get(sql) {
            return Err(ConnectionError::new(message.clone()));
        }
        Ok(self.responses.get(sql).cloned().unwrap_or_default())
    }

    fn execute_prepared(&mut self, sql: &str, params: &[Value]) -> Result<u64, ConnectionError> {
        self.prepared.push((sql.to_string(), params.to_vec()));
        Ok(params.len() as u64)
    }

    fn is_simulating(&self) -> bool {
        self.simulating
    }

    fn write_output(&mut self, sql: &str) {
        self.output.push(sql.to_string());
    }
}

/// Build a row from a JSON object literal
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A `SHOW COLUMNS` row
pub fn column_row(name: &str, data_type: Value, default: &str, comment: &str) -> Row {
    row(json!({
        "table_name": "t",
        "schema_name": "PUBLIC",
        "column_name": name,
        "data_type": data_type.to_string(),
        "null?": "true",
        "default": default,
        "kind": "COLUMN",
        "expression": "",
        "comment": comment,
        "database_name": "DB",
        "autoincrement": "",
    }))
}

/// A `SHOW ... KEYS` row
pub fn key_row(constraint: &str, column: &str, sequence: i64) -> Row {
    row(json!({
        "constraint_name": constraint,
        "column_name": column,
        "key_sequence": sequence,
    }))
}
