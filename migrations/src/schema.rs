//! Schema value objects
//!
//! Tables, columns, indexes and foreign keys are built by the migration
//! runner for a single operation, rendered or executed by the adapter, and
//! then dropped. Nothing here talks to the database.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use snowdrift_types::CanonicalType;

use crate::error::{AdapterError, Result};
use crate::grammar::is_primary_key_property;

/// A column default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ColumnDefault {
    /// A literal value, quoted according to the column's type family
    Literal(Value),
    /// Raw SQL emitted verbatim, e.g. `CURRENT_TIMESTAMP()` or `seq.nextval`
    Expression(String),
    /// Explicit `default null`
    Null,
}

/// Identity (auto-increment) settings. Seed and increment only render
/// when both are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub seed: Option<i64>,
    pub increment: Option<i64>,
}

/// A table column
///
/// ```
/// use snowdrift_migrations::Column;
///
/// let column = Column::new("email", "varchar").limit(320).not_null();
/// assert_eq!(column.name, "email");
/// assert!(!column.nullable);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Declared type name, any synonym Snowflake accepts
    #[serde(rename = "type")]
    pub sql_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Turns a bare `timestamp` into `timestamp_tz`
    #[serde(default)]
    pub timezone: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ColumnDefault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Raw SQL fragments appended after the definition
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
}

fn default_nullable() -> bool {
    true
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            precision: None,
            scale: None,
            limit: None,
            collation: None,
            nullable: true,
            timezone: false,
            default: None,
            identity: None,
            comment: None,
            properties: Vec::new(),
        }
    }

    /// The canonical type this column renders with
    pub fn canonical_type(&self) -> Result<CanonicalType> {
        Ok(CanonicalType::resolve_with_timezone(
            &self.sql_type,
            self.timezone,
        )?)
    }

    /// Whether any property marks this column as (part of) the primary key
    pub fn is_primary_key(&self) -> bool {
        self.properties.iter().any(|p| is_primary_key_property(p))
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    #[must_use]
    pub const fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub const fn timezone(mut self) -> Self {
        self.timezone = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(ColumnDefault::Literal(value.into()));
        self
    }

    #[must_use]
    pub fn default_expression(mut self, expression: impl Into<String>) -> Self {
        self.default = Some(ColumnDefault::Expression(expression.into()));
        self
    }

    #[must_use]
    pub fn default_null(mut self) -> Self {
        self.default = Some(ColumnDefault::Null);
        self
    }

    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = Some(Identity {
            seed: None,
            increment: None,
        });
        self
    }

    #[must_use]
    pub const fn identity_with(mut self, seed: i64, increment: i64) -> Self {
        self.identity = Some(Identity {
            seed: Some(seed),
            increment: Some(increment),
        });
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.properties.push(property.into());
        self
    }
}

/// How a table gets its identity id column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdColumn {
    /// Inject `"id" number identity not null` unless a column named `id` exists
    #[default]
    Implicit,
    /// Never inject an id column
    Disabled,
    /// Inject an identity column with this name
    Named {
        name: String,
        #[serde(default)]
        limit: Option<u32>,
    },
}

/// Table-level options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    #[serde(default)]
    pub id: IdColumn,
    /// Explicit primary key columns, taking precedence over every other source
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_key: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A table to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub options: TableOptions,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: TableOptions::default(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    #[must_use]
    pub fn without_id(mut self) -> Self {
        self.options.id = IdColumn::Disabled;
        self
    }

    #[must_use]
    pub fn id_column(mut self, name: impl Into<String>, limit: Option<u32>) -> Self {
        self.options.id = IdColumn::Named {
            name: name.into(),
            limit,
        };
        self
    }

    #[must_use]
    pub fn primary_key<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.options.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn unique<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.options.unique = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.options.comment = Some(comment.into());
        self
    }

    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Index type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Unique,
    PrimaryKey,
    /// Any other type name, kept for error reporting
    Other(String),
}

impl IndexKind {
    /// Parse a type name; `primary key` and `primary_key` are both accepted
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unique") {
            Self::Unique
        } else if is_primary_key_property(s) {
            Self::PrimaryKey
        } else {
            Self::Other(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unique => "unique",
            Self::PrimaryKey => "primary key",
            Self::Other(s) => s,
        }
    }
}

/// An index or key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub kind: IndexKind,
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Index {
    pub fn new<S: Into<String>>(kind: IndexKind, columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
            name: None,
        }
    }

    pub fn unique<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self::new(IndexKind::Unique, columns)
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A foreign key. Snowflake does not enforce referential actions, so
/// `on_update` and `on_delete` are carried but never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
}

impl ForeignKey {
    pub fn new<S: Into<String>, R: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        referenced_table: impl Into<String>,
        referenced_columns: impl IntoIterator<Item = R>,
    ) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            referenced_table: referenced_table.into(),
            referenced_columns: referenced_columns.into_iter().map(Into::into).collect(),
            name: None,
            on_update: None,
            on_delete: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn on_delete(mut self, action: impl Into<String>) -> Self {
        self.on_delete = Some(action.into());
        self
    }

    #[must_use]
    pub fn on_update(mut self, action: impl Into<String>) -> Self {
        self.on_update = Some(action.into());
        self
    }
}

/// Target columns for a primary key change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewPrimaryKey {
    /// Drop the primary key without adding a new one
    None,
    Single(String),
    Many(Vec<String>),
}

impl NewPrimaryKey {
    pub fn columns(&self) -> &[String] {
        match self {
            Self::None => &[],
            Self::Single(column) => std::slice::from_ref(column),
            Self::Many(columns) => columns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }
}

impl From<&str> for NewPrimaryKey {
    fn from(column: &str) -> Self {
        Self::Single(column.to_string())
    }
}

impl From<Vec<String>> for NewPrimaryKey {
    fn from(columns: Vec<String>) -> Self {
        Self::Many(columns)
    }
}

impl TryFrom<&Value> for NewPrimaryKey {
    type Error = AdapterError;

    /// Accepts `null`, a string, or an array of strings
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::None),
            Value::String(column) => Ok(Self::Single(column.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        AdapterError::InvalidArgument(format!(
                            "primary key columns must be strings, got {item}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Many),
            other => Err(AdapterError::InvalidArgument(format!(
                "primary key columns must be null, a string or a list of strings, got {other}"
            ))),
        }
    }
}
