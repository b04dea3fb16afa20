//! Adapter error types

use snowdrift_types::UnknownTypeError;

use crate::config::ConfigError;
use crate::connection::ConnectionError;

/// Errors surfaced by the Snowflake adapter.
///
/// Validation failures (`UnknownType`, `InvalidArgument`,
/// `UnsupportedIndexType`) are raised before any statement is sent.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error(transparent)]
    UnknownType(#[from] UnknownTypeError),

    #[error("column '{column}' does not exist in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported index type '{0}', only unique indexes can be added")]
    UnsupportedIndexType(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("introspection error: {0}")]
    Introspection(String),

    #[error(transparent)]
    Execution(#[from] ConnectionError),
}

impl AdapterError {
    pub(crate) fn column_not_found(table: &str, column: &str) -> Self {
        Self::ColumnNotFound {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

/// Result alias used throughout the adapter
pub type Result<T, E = AdapterError> = std::result::Result<T, E>;
