//! CREATE TABLE composition
//!
//! A table gets exactly one `primary key (...)` clause. Its columns come from
//! the first source that names any, in this order:
//!
//! 1. `TableOptions::primary_key` or a primary-key [`Index`]
//! 2. columns carrying a `primary key` property
//! 3. the injected id column
//!
//! The table option and primary-key indexes must all name the same columns.
//! Column-level `primary key` properties are never rendered inline.

use crate::definition::render_column_definition;
use crate::error::{AdapterError, Result};
use crate::quote::{quote_column_list, quote_column_name, quote_string, quote_table_name};
use crate::schema::{Column, IdColumn, Index, IndexKind, Table};

/// Build the `create table` statement for `table`
///
/// ```
/// use snowdrift_migrations::{Column, Table, create_table_sql};
///
/// let table = Table::new("users").column(Column::new("email", "varchar").not_null());
/// assert_eq!(
///     create_table_sql(&table).unwrap(),
///     r#"create table "users" ("id" number identity not null, "email" varchar not null, primary key ("id"))"#
/// );
/// ```
pub fn create_table_sql(table: &Table) -> Result<String> {
    for index in &table.indexes {
        if let IndexKind::Other(kind) = &index.kind {
            return Err(AdapterError::UnsupportedIndexType(kind.clone()));
        }
    }

    let id_column = injected_id_column(table);

    let mut parts = Vec::with_capacity(table.columns.len() + table.indexes.len() + 2);
    for column in id_column.iter().chain(&table.columns) {
        parts.push(format!(
            "{} {}",
            quote_column_name(&column.name),
            render_column_definition(column)?
        ));
    }

    if let Some(clause) = primary_key_clause(table, id_column.as_ref())? {
        parts.push(clause);
    }

    if !table.options.unique.is_empty() {
        parts.push(format!(
            "unique ({})",
            quote_column_list(&table.options.unique)
        ));
    }
    for index in table
        .indexes
        .iter()
        .filter(|index| index.kind == IndexKind::Unique)
    {
        parts.push(constraint_clause("unique", index));
    }

    let mut sql = format!(
        "create table {} ({})",
        quote_table_name(&table.name),
        parts.join(", ")
    );
    if let Some(comment) = &table.options.comment {
        sql.push_str(" comment = ");
        sql.push_str(&quote_string(comment));
    }
    Ok(sql)
}

/// The synthetic identity column to prepend, if any
fn injected_id_column(table: &Table) -> Option<Column> {
    let (name, limit) = match &table.options.id {
        IdColumn::Disabled => return None,
        IdColumn::Implicit => ("id", None),
        IdColumn::Named { name, limit } => (name.as_str(), *limit),
    };
    if table.find_column(name).is_some() {
        return None;
    }
    let column = Column::new(name, "number").identity().not_null();
    Some(match limit {
        Some(limit) => column.precision(limit),
        None => column,
    })
}

fn primary_key_clause(table: &Table, id_column: Option<&Column>) -> Result<Option<String>> {
    let indexes: Vec<&Index> = table
        .indexes
        .iter()
        .filter(|index| index.kind == IndexKind::PrimaryKey)
        .collect();

    // Explicit sources must agree on the key columns
    let explicit = (!table.options.primary_key.is_empty())
        .then_some(table.options.primary_key.as_slice())
        .into_iter()
        .chain(indexes.iter().map(|index| index.columns.as_slice()));
    let mut chosen: Option<&[String]> = None;
    for columns in explicit {
        match chosen {
            None => chosen = Some(columns),
            Some(first) if first != columns => {
                return Err(AdapterError::InvalidArgument(format!(
                    "table '{}' declares conflicting primary keys ({}) and ({})",
                    table.name,
                    first.join(", "),
                    columns.join(", ")
                )));
            }
            Some(_) => {}
        }
    }

    if chosen.is_some() {
        // Keep a constraint name when any primary-key index carries one
        let index = indexes
            .iter()
            .find(|index| index.name.is_some())
            .or(indexes.first());
        return Ok(Some(match index {
            Some(index) => constraint_clause("primary key", index),
            None => format!(
                "primary key ({})",
                quote_column_list(&table.options.primary_key)
            ),
        }));
    }

    let flagged: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| c.is_primary_key())
        .map(|c| c.name.as_str())
        .collect();
    if !flagged.is_empty() {
        return Ok(Some(format!("primary key ({})", quote_column_list(&flagged))));
    }

    Ok(id_column.map(|c| format!("primary key ({})", quote_column_name(&c.name))))
}

fn constraint_clause(keyword: &str, index: &Index) -> String {
    let columns = quote_column_list(&index.columns);
    match &index.name {
        Some(name) => format!(
            "constraint {} {keyword} ({columns})",
            quote_column_name(name)
        ),
        None => format!("{keyword} ({columns})"),
    }
}
