//! ALTER TABLE instruction building
//!
//! Every schema change is expressed as an [`AlterInstructions`]: fragments
//! that each follow `alter table "<name>"`, plus standalone statements that
//! run after them. Snowflake's ALTER COLUMN grammar only allows one change
//! per clause, so a column change is split into several fragments.

use snowdrift_types::CanonicalType;

use crate::definition::{render_column_definition, render_default, render_type};
use crate::error::{AdapterError, Result};
use crate::quote::{quote_column_list, quote_column_name, quote_string, quote_table_name};
use crate::schema::{Column, ForeignKey, Index, IndexKind, NewPrimaryKey};

/// Ordered alter fragments plus post-statements for one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlterInstructions {
    alter_parts: Vec<String>,
    post_steps: Vec<String>,
}

impl AlterInstructions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_alter(&mut self, part: impl Into<String>) {
        self.alter_parts.push(part.into());
    }

    pub fn add_post_step(&mut self, sql: impl Into<String>) {
        self.post_steps.push(sql.into());
    }

    /// Append another instruction set after this one
    pub fn merge(&mut self, other: AlterInstructions) {
        self.alter_parts.extend(other.alter_parts);
        self.post_steps.extend(other.post_steps);
    }

    pub fn alter_parts(&self) -> &[String] {
        &self.alter_parts
    }

    pub fn post_steps(&self) -> &[String] {
        &self.post_steps
    }

    pub fn is_empty(&self) -> bool {
        self.alter_parts.is_empty() && self.post_steps.is_empty()
    }

    /// The statements to run, in order: one `alter table` per fragment, then
    /// each post-statement verbatim.
    pub fn statements(&self, table: &str) -> Vec<String> {
        let table = quote_table_name(table);
        self.alter_parts
            .iter()
            .map(|part| format!("alter table {table} {part}"))
            .chain(self.post_steps.iter().cloned())
            .collect()
    }
}

/// Builds [`AlterInstructions`] for a single table
#[derive(Debug, Clone)]
pub struct AlterInstructionBuilder {
    table: String,
}

impl AlterInstructionBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn single(part: String) -> AlterInstructions {
        let mut instructions = AlterInstructions::new();
        instructions.add_alter(part);
        instructions
    }

    pub fn add_column(&self, column: &Column) -> Result<AlterInstructions> {
        Ok(Self::single(format!(
            "add {} {}",
            quote_column_name(&column.name),
            render_column_definition(column)?
        )))
    }

    pub fn rename_column(&self, from: &str, to: &str) -> AlterInstructions {
        Self::single(format!(
            "rename column {} to {}",
            quote_column_name(from),
            quote_column_name(to)
        ))
    }

    pub fn drop_column(&self, column: &str) -> AlterInstructions {
        Self::single(format!("drop column {}", quote_column_name(column)))
    }

    /// Diff the live column named `name` against `desired`.
    ///
    /// Fragments are emitted in a fixed order: type, default, nullability,
    /// comment, varchar length/collation, number precision. A rename is
    /// appended last when `desired` carries a different name.
    pub fn change_column(
        &self,
        current_columns: &[Column],
        name: &str,
        desired: &Column,
    ) -> Result<AlterInstructions> {
        let current = current_columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AdapterError::column_not_found(&self.table, name))?;

        let current_ty = current.canonical_type()?;
        let desired_ty = desired.canonical_type()?;
        let target = quote_column_name(name);
        let mut instructions = AlterInstructions::new();

        if current_ty.stored() != desired_ty.stored() {
            instructions.add_alter(format!(
                "alter column {target} set data type {}",
                render_type(desired)?
            ));
        }

        let current_default = render_default(current.default.as_ref(), current_ty);
        let desired_default = render_default(desired.default.as_ref(), desired_ty);
        if current_default != desired_default {
            match desired_default {
                Some(value) => {
                    instructions.add_alter(format!("alter column {target} set default {value}"))
                }
                None => instructions.add_alter(format!("alter column {target} drop default")),
            }
        }

        if current.nullable != desired.nullable {
            let change = if desired.nullable { "drop" } else { "set" };
            instructions.add_alter(format!("alter column {target} {change} not null"));
        }

        if current.comment != desired.comment {
            match &desired.comment {
                Some(comment) => instructions.add_alter(format!(
                    "alter column {target} comment {}",
                    quote_string(comment)
                )),
                None => instructions.add_alter(format!("alter column {target} unset comment")),
            }
        }

        let both = |ty: CanonicalType| current_ty == ty && desired_ty == ty;

        if both(CanonicalType::Varchar) {
            let limit_changed = desired.limit.is_some() && desired.limit != current.limit;
            let collation_changed =
                desired.collation.is_some() && desired.collation != current.collation;
            if limit_changed || collation_changed {
                instructions.add_alter(format!(
                    "alter column {target} set data type {}",
                    render_type(desired)?
                ));
            }
        }

        if both(CanonicalType::Number)
            && let Some(precision) = desired.precision
        {
            let scale = desired.scale.or(current.scale).unwrap_or(0);
            if Some(precision) != current.precision || Some(scale) != current.scale {
                instructions.add_alter(format!(
                    "alter column {target} set data type number({precision},{scale})"
                ));
            }
        }

        if desired.name != name {
            instructions.merge(self.rename_column(name, &desired.name));
        }

        Ok(instructions)
    }

    /// Only unique indexes can be added after creation
    pub fn add_index(&self, index: &Index) -> Result<AlterInstructions> {
        if index.kind != IndexKind::Unique {
            return Err(AdapterError::UnsupportedIndexType(
                index.kind.as_str().to_string(),
            ));
        }
        let columns = quote_column_list(&index.columns);
        Ok(Self::single(match &index.name {
            Some(name) => format!(
                "add constraint {} unique ({columns})",
                quote_column_name(name)
            ),
            None => format!("add unique ({columns})"),
        }))
    }

    pub fn drop_index(&self, columns: &[String]) -> AlterInstructions {
        Self::single(format!("drop unique ({})", quote_column_list(columns)))
    }

    pub fn drop_index_by_name(&self, name: &str) -> AlterInstructions {
        Self::single(format!("drop constraint {}", quote_column_name(name)))
    }

    pub fn add_foreign_key(&self, foreign_key: &ForeignKey) -> AlterInstructions {
        let constraint = foreign_key
            .name
            .as_deref()
            .map(|name| format!("constraint {} ", quote_column_name(name)))
            .unwrap_or_default();
        Self::single(format!(
            "add {constraint}foreign key ({}) references {}({})",
            quote_column_list(&foreign_key.columns),
            quote_table_name(&foreign_key.referenced_table),
            quote_column_list(&foreign_key.referenced_columns)
        ))
    }

    pub fn drop_foreign_key(&self, constraint: &str) -> AlterInstructions {
        Self::single(format!("drop constraint {}", quote_column_name(constraint)))
    }

    pub fn drop_foreign_key_by_columns(&self, columns: &[String]) -> AlterInstructions {
        Self::single(format!("drop foreign key ({})", quote_column_list(columns)))
    }

    pub fn drop_table(&self) -> AlterInstructions {
        let mut instructions = AlterInstructions::new();
        instructions.add_post_step(format!("drop table {}", quote_table_name(&self.table)));
        instructions
    }

    pub fn rename_table(&self, new_name: &str) -> AlterInstructions {
        Self::single(format!("rename to {}", quote_table_name(new_name)))
    }

    /// Drop the existing primary key if there is one, then add the new one
    /// unless `new_columns` is empty.
    pub fn change_primary_key(
        &self,
        has_primary_key: bool,
        new_columns: &NewPrimaryKey,
    ) -> AlterInstructions {
        let mut instructions = AlterInstructions::new();
        if has_primary_key {
            instructions.add_alter("drop primary key");
        }
        if !new_columns.is_empty() {
            instructions.add_alter(format!(
                "add primary key ({})",
                quote_column_list(new_columns.columns())
            ));
        }
        instructions
    }

    pub fn change_comment(&self, comment: Option<&str>) -> AlterInstructions {
        let mut instructions = AlterInstructions::new();
        instructions.add_post_step(format!(
            "comment on table {} is {}",
            quote_table_name(&self.table),
            quote_string(comment.unwrap_or_default())
        ));
        instructions
    }
}
