//! Column definition rendering
//!
//! Turns a [`Column`] into the DDL fragment that follows its quoted name in
//! `create table` and `alter table ... add`:
//!
//! ```text
//! <type>[(params)] [collate '<c>'] [identity[(seed,increment)]] null|not null
//!     [default <v>] [properties...] [comment '<c>']
//! ```

use serde_json::Value;
use snowdrift_types::{CanonicalType, TypeFamily};

use crate::error::Result;
use crate::grammar::{is_function_default, is_primary_key_property, parse_bool_token};
use crate::quote::quote_string;
use crate::schema::{Column, ColumnDefault};

/// Render the full column definition.
///
/// ```
/// use snowdrift_migrations::{Column, render_column_definition};
///
/// let column = Column::new("amount", "decimal").precision(9).scale(5);
/// assert_eq!(render_column_definition(&column).unwrap(), "number(9,5) null");
/// ```
pub fn render_column_definition(column: &Column) -> Result<String> {
    let ty = column.canonical_type()?;
    let mut def = render_canonical_type(ty, column);

    if ty.supports_identity()
        && let Some(identity) = column.identity
    {
        def.push_str(" identity");
        if let (Some(seed), Some(increment)) = (identity.seed, identity.increment) {
            def.push_str(&format!("({seed},{increment})"));
        }
    }

    def.push_str(if column.nullable { " null" } else { " not null" });

    if let Some(default) = render_default(column.default.as_ref(), ty) {
        def.push_str(" default ");
        def.push_str(&default);
    }

    for property in column
        .properties
        .iter()
        .filter(|p| !is_primary_key_property(p))
    {
        def.push(' ');
        def.push_str(property);
    }

    if let Some(comment) = &column.comment {
        def.push_str(" comment ");
        def.push_str(&quote_string(comment));
    }

    Ok(def)
}

/// Render only the type part, as used by `set data type`
pub fn render_type(column: &Column) -> Result<String> {
    Ok(render_canonical_type(column.canonical_type()?, column))
}

fn render_canonical_type(ty: CanonicalType, column: &Column) -> String {
    let mut out = String::from(ty.as_str());
    match ty {
        CanonicalType::Number => {
            if let Some(precision) = column.precision {
                out.push_str(&format!("({precision},{})", column.scale.unwrap_or(0)));
            }
        }
        CanonicalType::Varchar => {
            if let Some(limit) = column.limit {
                out.push_str(&format!("({limit})"));
            }
            if let Some(collation) = &column.collation {
                out.push_str(" collate ");
                out.push_str(&quote_string(collation));
            }
        }
        CanonicalType::Binary | CanonicalType::Varbinary => {
            if let Some(limit) = column.limit {
                out.push_str(&format!("({limit})"));
            }
        }
        _ if ty.takes_precision() => {
            if let Some(precision) = column.precision {
                out.push_str(&format!("({precision})"));
            }
        }
        _ => {}
    }
    out
}

/// Render the value that follows `default`, or `None` when nothing is emitted
pub fn render_default(default: Option<&ColumnDefault>, ty: CanonicalType) -> Option<String> {
    match default? {
        ColumnDefault::Null | ColumnDefault::Literal(Value::Null) => Some("null".to_string()),
        ColumnDefault::Expression(expr) => Some(expr.clone()),
        ColumnDefault::Literal(value) => Some(render_literal_default(value, ty.family())),
    }
}

fn render_literal_default(value: &Value, family: TypeFamily) -> String {
    let text = match value {
        Value::String(s) if is_function_default(s) => return s.clone(),
        Value::String(s) => s.clone(),
        Value::Bool(b) if !family.has_quoted_literals() => return b.to_string(),
        Value::Number(n) if family == TypeFamily::Boolean => {
            return (n.as_f64() != Some(0.0)).to_string();
        }
        other => other.to_string(),
    };

    if family.has_bare_literals() {
        text
    } else if family == TypeFamily::Boolean {
        match parse_bool_token(&text) {
            Some(b) => b.to_string(),
            None => quote_string(&text),
        }
    } else {
        quote_string(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(column: Column) -> String {
        render_column_definition(&column).unwrap()
    }

    #[test]
    fn test_number_precision_and_scale() {
        assert_eq!(
            render(Column::new("n", "number").precision(9).scale(5)),
            "number(9,5) null"
        );
        assert_eq!(render(Column::new("n", "number").precision(9)), "number(9,0) null");
        // Scale without precision is dropped
        assert_eq!(render(Column::new("n", "int").scale(3)), "number null");
    }

    #[test]
    fn test_varchar_limit_and_collation() {
        assert_eq!(
            render(
                Column::new("s", "varchar")
                    .limit(42)
                    .collation("en-cs")
                    .not_null()
            ),
            "varchar(42) collate 'en-cs' not null"
        );
        assert_eq!(render(Column::new("s", "text")), "varchar null");
    }

    #[test]
    fn test_identity() {
        assert_eq!(
            render(Column::new("id", "number").identity_with(111, 222)),
            "number identity(111,222) null"
        );
        assert_eq!(
            render(Column::new("id", "bigint").identity().not_null()),
            "number identity not null"
        );
        // Identity is ignored on non-numeric types
        assert_eq!(render(Column::new("s", "varchar").identity()), "varchar null");
    }

    #[test]
    fn test_temporal_precision() {
        assert_eq!(render(Column::new("t", "time").precision(3)), "time(3) null");
        assert_eq!(
            render(Column::new("t", "timestamp").timezone().precision(6)),
            "timestamp_tz(6) null"
        );
        assert_eq!(render(Column::new("d", "date").precision(3)), "date null");
    }

    #[test]
    fn test_mismatched_parameters_are_ignored() {
        assert_eq!(
            render(Column::new("b", "boolean").limit(10).collation("en")),
            "boolean null"
        );
        assert_eq!(render(Column::new("v", "variant").precision(4)), "variant null");
    }

    #[test]
    fn test_binary_limit() {
        assert_eq!(render(Column::new("b", "binary").limit(16)), "binary(16) null");
        assert_eq!(render(Column::new("b", "varbinary")), "varbinary null");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            render(Column::new("n", "int").default_value(5)),
            "number null default 5"
        );
        assert_eq!(
            render(Column::new("n", "float").default_value("1.5")),
            "float null default 1.5"
        );
        assert_eq!(
            render(Column::new("s", "varchar").default_value("it's")),
            "varchar null default 'it''s'"
        );
        assert_eq!(
            render(Column::new("d", "date").default_value("2020-01-01")),
            "date null default '2020-01-01'"
        );
        assert_eq!(
            render(Column::new("b", "boolean").default_value(true)),
            "boolean null default true"
        );
        assert_eq!(
            render(Column::new("b", "boolean").default_value("FALSE")),
            "boolean null default false"
        );
        assert_eq!(
            render(Column::new("b", "boolean").default_value(0)),
            "boolean null default false"
        );
    }

    #[test]
    fn test_function_defaults_are_verbatim() {
        assert_eq!(
            render(Column::new("t", "timestamp_ntz").default_value("current_timestamp()")),
            "timestamp_ntz null default current_timestamp()"
        );
        assert_eq!(
            render(Column::new("u", "varchar").default_value("uuid_string()")),
            "varchar null default uuid_string()"
        );
        assert_eq!(
            render(Column::new("t", "timestamp").default_expression("CAST(0 AS TIMESTAMP)")),
            "timestamp null default CAST(0 AS TIMESTAMP)"
        );
    }

    #[test]
    fn test_null_default_and_absent_default_differ() {
        assert_eq!(
            render(Column::new("s", "varchar").default_null()),
            "varchar null default null"
        );
        assert_eq!(render(Column::new("s", "varchar")), "varchar null");
        assert_eq!(
            render_default(Some(&ColumnDefault::Literal(json!(null))), CanonicalType::Varchar),
            Some("null".into())
        );
    }

    #[test]
    fn test_properties_skip_primary_key() {
        assert_eq!(
            render(
                Column::new("id", "int")
                    .not_null()
                    .property("primary key")
                    .property("unique")
                    .property("primary_key")
            ),
            "number not null unique"
        );
    }

    #[test]
    fn test_comment_last() {
        assert_eq!(
            render(
                Column::new("n", "int")
                    .default_value(1)
                    .property("unique")
                    .comment("the user's count")
            ),
            "number null default 1 unique comment 'the user''s count'"
        );
    }

    #[test]
    fn test_unknown_type_fails() {
        assert!(render_column_definition(&Column::new("x", "money")).is_err());
    }
}
