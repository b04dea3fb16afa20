//! Small token checks shared by the renderer and the introspection parser

/// Function names whose calls are valid column defaults and must be emitted
/// verbatim. Matched as a case-insensitive prefix, so `to_timestamp` also
/// covers `to_timestamp_ntz(...)` and friends.
const DEFAULT_FUNCTIONS: &[&str] = &[
    "current_timestamp",
    "sysdate",
    "convert_timezone",
    "to_varchar",
    "to_timestamp",
    "uuid_string",
];

/// Whether a default value is one of the known function calls
pub fn is_function_default(value: &str) -> bool {
    let value = value.trim();
    DEFAULT_FUNCTIONS.iter().any(|f| {
        value
            .get(..f.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(f))
    })
}

/// Parse `true` / `false` in any case
pub fn parse_bool_token(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse the `null?` column of `SHOW COLUMNS` or `DESCRIBE TABLE` output,
/// which is either a boolean token or `Y`/`N`.
pub fn parse_null_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("y") {
        Some(true)
    } else if value.eq_ignore_ascii_case("n") {
        Some(false)
    } else {
        parse_bool_token(value)
    }
}

/// Whether a column property declares a primary key
pub fn is_primary_key_property(property: &str) -> bool {
    let property = property.trim();
    property.eq_ignore_ascii_case("primary key") || property.eq_ignore_ascii_case("primary_key")
}

/// Strip one pair of surrounding single quotes and undo `''` escaping.
/// Returns `None` when `value` is not a single-quoted literal.
pub fn unquote_string_literal(value: &str) -> Option<String> {
    let inner = value.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("''", "'"))
}
