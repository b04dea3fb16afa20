//! # Snowdrift
//!
//! A Snowflake dialect adapter for schema migration runners.
//!
//! ## Quick Start
//!
//! ```rust
//! use snowdrift::prelude::*;
//!
//! let table = Table::new("events")
//!     .column(Column::new("payload", "variant"))
//!     .column(Column::new("received_at", "timestamp").timezone().precision(3).not_null());
//!
//! assert_eq!(
//!     create_table_sql(&table).unwrap(),
//!     r#"create table "events" ("id" number identity not null, "payload" variant null, "received_at" timestamp_tz(3) not null, primary key ("id"))"#
//! );
//! ```
//!
//! To run statements, implement [`Connection`](migrations::Connection) for
//! your driver and hand it to a [`SnowflakeAdapter`](migrations::SnowflakeAdapter).
//!
//! ## Crates
//!
//! | Crate                  | Contents                                         |
//! |------------------------|--------------------------------------------------|
//! | `snowdrift-types`      | Type synonyms, canonical types, type families    |
//! | `snowdrift-migrations` | DDL rendering, introspection, the adapter itself |
//!
//! ## Features
//!
//! - `tracing` - statement and transaction events via `tracing` (enabled by default)
//! - `serde` - serde derives on the type vocabulary

/// Snowflake type vocabulary
pub use snowdrift_types as types;

/// DDL rendering, introspection and the adapter
pub use snowdrift_migrations as migrations;

pub use snowdrift_migrations::{AdapterError, Result};

/// Common imports
pub mod prelude {
    pub use snowdrift_migrations::{
        AdapterConfig, AlterInstructionBuilder, AlterInstructions, Column, ColumnDefault,
        Connection, ForeignKey, Index, IndexKind, NewPrimaryKey, SnowflakeAdapter, Table,
        VersionOrder, create_table_sql, render_column_definition,
    };
    pub use snowdrift_types::{CanonicalType, TypeFamily};
}
