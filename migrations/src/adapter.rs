//! The Snowflake adapter
//!
//! [`SnowflakeAdapter`] is the surface a migration runner talks to. It owns a
//! [`Connection`] and an [`AdapterConfig`], validates caller input, builds
//! SQL with the rendering modules and sends it in order. No schema metadata
//! is cached between calls.

use serde_json::Value;
use snowdrift_types::{CanonicalType, is_valid_type};

use crate::alter::{AlterInstructionBuilder, AlterInstructions};
use crate::bulk_insert::InsertStatement;
use crate::config::AdapterConfig;
use crate::connection::{Connection, Row};
use crate::create::create_table_sql;
use crate::error::{AdapterError, Result};
use crate::introspect::{
    group_key_columns, parse_columns, show_columns_sql, show_databases_sql,
    show_imported_keys_sql, show_primary_keys_sql, show_tables_sql, show_unique_keys_sql,
};
use crate::quote::{quote_column_name, quote_table_name};
use crate::schema::{Column, ForeignKey, Index, NewPrimaryKey, Table};
use crate::trace::{snowdrift_trace_simulated, snowdrift_trace_statement, snowdrift_trace_tx};
use crate::version_log::{VersionLog, read_version_log};

/// A resolved column type, as reported by [`SnowflakeAdapter::sql_type`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlType {
    pub name: CanonicalType,
    pub limit: Option<u32>,
}

/// Snowflake dialect adapter over a caller-supplied connection
#[derive(Debug)]
pub struct SnowflakeAdapter<C> {
    conn: C,
    config: AdapterConfig,
}

impl<C: Connection> SnowflakeAdapter<C> {
    pub fn new(conn: C, config: AdapterConfig) -> Self {
        Self { conn, config }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    pub fn into_inner(self) -> C {
        self.conn
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Run a statement, or write it to the output sink while simulating
    pub fn execute(&mut self, sql: &str) -> Result<u64> {
        if self.conn.is_simulating() {
            snowdrift_trace_simulated!(sql);
            self.conn.write_output(sql);
            return Ok(0);
        }
        snowdrift_trace_statement!(sql, 0usize);
        self.conn
            .execute(sql)
            .map_err(|e| e.with_sql(sql).into())
    }

    fn fetch_all(&mut self, sql: &str) -> Result<Vec<Row>> {
        snowdrift_trace_statement!(sql, 0usize);
        self.conn
            .fetch_all(sql)
            .map_err(|e| e.with_sql(sql).into())
    }

    fn fetch_row(&mut self, sql: &str) -> Result<Option<Row>> {
        snowdrift_trace_statement!(sql, 0usize);
        self.conn
            .fetch_row(sql)
            .map_err(|e| e.with_sql(sql).into())
    }

    fn execute_instructions(&mut self, table: &str, instructions: &AlterInstructions) -> Result<()> {
        for statement in instructions.statements(table) {
            self.execute(&statement)?;
        }
        Ok(())
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    pub fn has_transactions(&self) -> bool {
        true
    }

    pub fn begin_transaction(&mut self) -> Result<()> {
        snowdrift_trace_tx!("begin");
        self.execute("begin transaction").map(drop)
    }

    pub fn commit_transaction(&mut self) -> Result<()> {
        snowdrift_trace_tx!("commit");
        self.execute("commit").map(drop)
    }

    pub fn rollback_transaction(&mut self) -> Result<()> {
        snowdrift_trace_tx!("rollback");
        self.execute("rollback").map(drop)
    }

    // =========================================================================
    // Quoting and types
    // =========================================================================

    pub fn quote_table_name(&self, name: &str) -> String {
        quote_table_name(name)
    }

    pub fn quote_column_name(&self, name: &str) -> String {
        quote_column_name(name)
    }

    /// Resolve a declared type and keep the limit when the type takes one
    pub fn sql_type(&self, raw: &str, limit: Option<u32>) -> Result<SqlType> {
        let name = CanonicalType::resolve(raw)?;
        Ok(SqlType {
            name,
            limit: limit.filter(|_| name.takes_limit()),
        })
    }

    pub fn is_valid_column_type(&self, column: &Column) -> bool {
        is_valid_type(&column.sql_type)
    }

    // =========================================================================
    // Tables
    // =========================================================================

    pub fn has_table(&mut self, table: &str) -> Result<bool> {
        Ok(self.fetch_row(&show_tables_sql(table))?.is_some())
    }

    pub fn create_table(&mut self, table: &Table) -> Result<()> {
        let sql = create_table_sql(table)?;
        self.execute(&sql).map(drop)
    }

    pub fn truncate_table(&mut self, table: &str) -> Result<()> {
        let sql = format!("truncate table {}", quote_table_name(table));
        self.execute(&sql).map(drop)
    }

    pub fn rename_table(&mut self, table: &str, new_name: &str) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).rename_table(new_name);
        self.execute_instructions(table, &instructions)
    }

    pub fn drop_table(&mut self, table: &str) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).drop_table();
        self.execute_instructions(table, &instructions)
    }

    pub fn change_comment(&mut self, table: &str, comment: Option<&str>) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).change_comment(comment);
        self.execute_instructions(table, &instructions)
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn get_columns(&mut self, table: &str) -> Result<Vec<Column>> {
        let rows = self.fetch_all(&show_columns_sql(table))?;
        parse_columns(&rows)
    }

    /// Exact, case-sensitive name match
    pub fn has_column(&mut self, table: &str, column: &str) -> Result<bool> {
        Ok(self.get_columns(table)?.iter().any(|c| c.name == column))
    }

    pub fn add_column(&mut self, table: &str, column: &Column) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).add_column(column)?;
        self.execute_instructions(table, &instructions)
    }

    pub fn rename_column(&mut self, table: &str, from: &str, to: &str) -> Result<()> {
        if !self.has_column(table, from)? {
            return Err(AdapterError::column_not_found(table, from));
        }
        let instructions = AlterInstructionBuilder::new(table).rename_column(from, to);
        self.execute_instructions(table, &instructions)
    }

    /// Move the live column `name` to the shape of `desired`
    pub fn change_column(&mut self, table: &str, name: &str, desired: &Column) -> Result<()> {
        desired.canonical_type()?;
        let current = self.get_columns(table)?;
        let instructions =
            AlterInstructionBuilder::new(table).change_column(&current, name, desired)?;
        self.execute_instructions(table, &instructions)
    }

    pub fn drop_column(&mut self, table: &str, column: &str) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).drop_column(column);
        self.execute_instructions(table, &instructions)
    }

    // =========================================================================
    // Indexes and keys
    // =========================================================================

    pub fn has_index(&mut self, table: &str, columns: &[&str]) -> Result<bool> {
        let rows = self.fetch_all(&show_unique_keys_sql(table))?;
        let keys = group_key_columns(&rows, "constraint_name", "column_name")?;
        Ok(keys.values().any(|cols| same_columns(cols, columns)))
    }

    pub fn has_index_by_name(&mut self, table: &str, name: &str) -> Result<bool> {
        let rows = self.fetch_all(&show_unique_keys_sql(table))?;
        let keys = group_key_columns(&rows, "constraint_name", "column_name")?;
        Ok(keys.contains_key(name))
    }

    pub fn add_index(&mut self, table: &str, index: &Index) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).add_index(index)?;
        self.execute_instructions(table, &instructions)
    }

    pub fn drop_index(&mut self, table: &str, columns: &[String]) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).drop_index(columns);
        self.execute_instructions(table, &instructions)
    }

    pub fn drop_index_by_name(&mut self, table: &str, name: &str) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).drop_index_by_name(name);
        self.execute_instructions(table, &instructions)
    }

    /// With a constraint name, compare names. Otherwise compare the ordered
    /// column list, where an empty list matches any primary key.
    pub fn has_primary_key(
        &mut self,
        table: &str,
        columns: &[&str],
        constraint: Option<&str>,
    ) -> Result<bool> {
        let rows = self.fetch_all(&show_primary_keys_sql(table))?;
        let keys = group_key_columns(&rows, "constraint_name", "column_name")?;
        Ok(match constraint {
            Some(name) => keys.contains_key(name),
            None if columns.is_empty() => !keys.is_empty(),
            None => keys.values().any(|cols| same_columns(cols, columns)),
        })
    }

    pub fn change_primary_key(&mut self, table: &str, new_columns: &NewPrimaryKey) -> Result<()> {
        let has_primary_key = self.has_primary_key(table, &[], None)?;
        let instructions =
            AlterInstructionBuilder::new(table).change_primary_key(has_primary_key, new_columns);
        self.execute_instructions(table, &instructions)
    }

    /// Same as [`Self::change_primary_key`], validating a loosely typed
    /// argument first: `null`, a string, or a list of strings.
    pub fn change_primary_key_value(&mut self, table: &str, new_columns: &Value) -> Result<()> {
        let new_columns = NewPrimaryKey::try_from(new_columns)?;
        self.change_primary_key(table, &new_columns)
    }

    /// Matches like [`Self::has_primary_key`]: an empty column list with no
    /// constraint name matches any foreign key.
    pub fn has_foreign_key(
        &mut self,
        table: &str,
        columns: &[&str],
        constraint: Option<&str>,
    ) -> Result<bool> {
        let rows = self.fetch_all(&show_imported_keys_sql(table))?;
        let keys = group_key_columns(&rows, "fk_name", "fk_column_name")?;
        Ok(match constraint {
            Some(name) => keys.contains_key(name),
            None if columns.is_empty() => !keys.is_empty(),
            None => keys.values().any(|cols| same_columns(cols, columns)),
        })
    }

    pub fn add_foreign_key(&mut self, table: &str, foreign_key: &ForeignKey) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).add_foreign_key(foreign_key);
        self.execute_instructions(table, &instructions)
    }

    pub fn drop_foreign_key(&mut self, table: &str, constraint: &str) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).drop_foreign_key(constraint);
        self.execute_instructions(table, &instructions)
    }

    pub fn drop_foreign_key_by_columns(&mut self, table: &str, columns: &[String]) -> Result<()> {
        let instructions = AlterInstructionBuilder::new(table).drop_foreign_key_by_columns(columns);
        self.execute_instructions(table, &instructions)
    }

    // =========================================================================
    // Databases
    // =========================================================================

    pub fn create_database(&mut self, name: &str) -> Result<()> {
        let sql = format!("create database {}", quote_table_name(name));
        self.execute(&sql).map(drop)
    }

    pub fn has_database(&mut self, name: &str) -> Result<bool> {
        Ok(self.fetch_row(&show_databases_sql(name))?.is_some())
    }

    pub fn drop_database(&mut self, name: &str) -> Result<()> {
        let sql = format!("drop database if exists {}", quote_table_name(name));
        self.execute(&sql).map(drop)
    }

    // =========================================================================
    // Data
    // =========================================================================

    pub fn insert(&mut self, table: &str, row: Row) -> Result<()> {
        self.bulk_insert(table, &[row])
    }

    /// Insert every row with one statement. While simulating, the statement
    /// is rendered with inline literals and written to the output sink.
    pub fn bulk_insert(&mut self, table: &str, rows: &[Row]) -> Result<()> {
        if self.conn.is_simulating() {
            if let Some(sql) = InsertStatement::inline(table, rows)? {
                snowdrift_trace_simulated!(&sql);
                self.conn.write_output(&sql);
            }
            return Ok(());
        }

        let Some(stmt) = InsertStatement::prepared(table, rows)? else {
            return Ok(());
        };
        snowdrift_trace_statement!(&stmt.sql, stmt.params.len());
        self.conn
            .execute_prepared(&stmt.sql, &stmt.params)
            .map(drop)
            .map_err(|e| e.with_sql(stmt.sql.as_str()).into())
    }

    /// Applied migrations, ordered per the configured `version_order`
    pub fn get_version_log(&mut self) -> Result<VersionLog> {
        read_version_log(&mut self.conn, &self.config)
    }
}

fn same_columns(found: &[String], wanted: &[&str]) -> bool {
    found.iter().map(String::as_str).eq(wanted.iter().copied())
}
