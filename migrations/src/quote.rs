//! Identifier and literal quoting
//!
//! Snowflake folds unquoted identifiers to upper case, so every table and
//! column name is double-quoted to keep it case-sensitive. Embedded double
//! quotes are not escaped; identifiers containing them are passed through
//! as-is.

/// Wrap an identifier in double quotes
///
/// ```
/// use snowdrift_migrations::quote_identifier;
///
/// assert_eq!(quote_identifier("users"), "\"users\"");
/// assert_eq!(quote_identifier("Mixed Case"), "\"Mixed Case\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{name}\"")
}

/// Quote a table name
pub fn quote_table_name(name: &str) -> String {
    quote_identifier(name)
}

/// Quote a column name
pub fn quote_column_name(name: &str) -> String {
    quote_identifier(name)
}

/// Render a single-quoted string literal, doubling embedded quotes
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote each column and join with `", "`
pub(crate) fn quote_column_list<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| quote_column_name(c.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_are_not_escaped() {
        assert_eq!(quote_identifier("a\"b"), "\"a\"b\"");
    }

    #[test]
    fn test_string_literals_double_quotes() {
        assert_eq!(quote_string("it's"), "'it''s'");
        assert_eq!(quote_string(""), "''");
    }

    #[test]
    fn test_column_list() {
        assert_eq!(quote_column_list(&["a", "B"]), "\"a\", \"B\"");
        assert_eq!(quote_column_list::<&str>(&[]), "");
    }
}
