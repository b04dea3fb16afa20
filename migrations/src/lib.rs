//! Snowdrift Migrations - Snowflake dialect adapter for migration runners
//!
//! This crate translates a database-agnostic migration model (tables,
//! columns, indexes, foreign keys, version history) into Snowflake SQL:
//!
//! - [`render_column_definition`] / [`create_table_sql`] - DDL rendering
//! - [`AlterInstructionBuilder`] - ALTER TABLE fragments for each schema change
//! - [`parse_columns`] - `SHOW COLUMNS` output back into [`Column`]s
//! - [`InsertStatement`] - multi-row inserts, bound or inline
//! - [`SnowflakeAdapter`] - the full surface, driving a caller-supplied [`Connection`]
//!
//! # Example
//!
//! ```ignore
//! use snowdrift_migrations::{AdapterConfig, Column, SnowflakeAdapter, Table, VersionOrder};
//!
//! let config = AdapterConfig::from_file("snowdrift.toml".as_ref())?;
//! let mut adapter = SnowflakeAdapter::new(my_connection, config);
//!
//! adapter.begin_transaction()?;
//! adapter.create_table(
//!     &Table::new("users")
//!         .column(Column::new("email", "varchar").limit(320).not_null())
//!         .column(Column::new("created_at", "timestamp").timezone().default_expression("current_timestamp()")),
//! )?;
//! adapter.commit_transaction()?;
//!
//! for (version, entry) in adapter.get_version_log()? {
//!     println!("{version} {:?}", entry.migration_name);
//! }
//! ```
//!
//! # Features
//!
//! - `tracing` - emit `snowdrift.statement` / `snowdrift.transaction` events (enabled by default)

mod trace;

pub mod adapter;
pub mod alter;
pub mod bulk_insert;
pub mod config;
pub mod connection;
pub mod create;
pub mod definition;
pub mod error;
pub mod grammar;
pub mod introspect;
pub mod quote;
pub mod schema;
pub mod version_log;

pub use adapter::{SnowflakeAdapter, SqlType};
pub use alter::{AlterInstructionBuilder, AlterInstructions};
pub use bulk_insert::InsertStatement;
pub use config::{AdapterConfig, ConfigError, VersionOrder};
pub use connection::{Connection, ConnectionError, Cursor, Row};
pub use create::create_table_sql;
pub use definition::{render_column_definition, render_type};
pub use error::{AdapterError, Result};
pub use introspect::{TypeDescriptor, parse_columns};
pub use quote::{quote_column_name, quote_identifier, quote_string, quote_table_name};
pub use schema::{
    Column, ColumnDefault, ForeignKey, IdColumn, Identity, Index, IndexKind, NewPrimaryKey, Table,
    TableOptions,
};
pub use version_log::{VersionLog, VersionLogEntry, version_log_sql};

pub use snowdrift_types::{CanonicalType, TypeFamily, UnknownTypeError};
