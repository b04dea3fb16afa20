//! Statement execution boundary
//!
//! The adapter never owns a connection. Callers plug in whatever driver they
//! run against Snowflake by implementing [`Connection`]; the adapter only
//! hands it finished SQL and reads back rows.

use serde_json::{Map, Value};

/// A result row, keyed by the lowercase column names Snowflake returns.
pub type Row = Map<String, Value>;

/// Owning iterator over the rows of a query
#[derive(Debug, Default)]
pub struct Cursor {
    rows: std::vec::IntoIter<Row>,
}

impl Cursor {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl Iterator for Cursor {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Cursor {}

/// Failure reported by the underlying driver
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("statement failed: {message}")]
pub struct ConnectionError {
    message: String,
    sql: Option<String>,
}

impl ConnectionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sql: None,
        }
    }

    /// Attach the statement that failed
    #[must_use]
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }
}

/// Synchronous execution collaborator.
///
/// Only `execute`, `fetch_all`, `execute_prepared` and `write_output` are
/// required. The remaining methods have defaults built on top of them.
pub trait Connection {
    /// Run a statement, returning the affected row count
    fn execute(&mut self, sql: &str) -> Result<u64, ConnectionError>;

    /// Run a query and collect every row
    fn fetch_all(&mut self, sql: &str) -> Result<Vec<Row>, ConnectionError>;

    /// Run a query and return its first row, if any
    fn fetch_row(&mut self, sql: &str) -> Result<Option<Row>, ConnectionError> {
        Ok(self.fetch_all(sql)?.into_iter().next())
    }

    /// Run a query and iterate over its rows
    fn query(&mut self, sql: &str) -> Result<Cursor, ConnectionError> {
        self.fetch_all(sql).map(Cursor::new)
    }

    /// Prepare `sql`, bind `params` positionally to `:1..:n` and execute it
    fn execute_prepared(&mut self, sql: &str, params: &[Value]) -> Result<u64, ConnectionError>;

    /// Whether statements should be rendered to the output sink instead of run
    fn is_simulating(&self) -> bool {
        false
    }

    /// Output sink for simulated SQL
    fn write_output(&mut self, sql: &str);
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn execute(&mut self, sql: &str) -> Result<u64, ConnectionError> {
        (**self).execute(sql)
    }

    fn fetch_all(&mut self, sql: &str) -> Result<Vec<Row>, ConnectionError> {
        (**self).fetch_all(sql)
    }

    fn fetch_row(&mut self, sql: &str) -> Result<Option<Row>, ConnectionError> {
        (**self).fetch_row(sql)
    }

    fn query(&mut self, sql: &str) -> Result<Cursor, ConnectionError> {
        (**self).query(sql)
    }

    fn execute_prepared(&mut self, sql: &str, params: &[Value]) -> Result<u64, ConnectionError> {
        (**self).execute_prepared(sql, params)
    }

    fn is_simulating(&self) -> bool {
        (**self).is_simulating()
    }

    fn write_output(&mut self, sql: &str) {
        (**self).write_output(sql)
    }
}
