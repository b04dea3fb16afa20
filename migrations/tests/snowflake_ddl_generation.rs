//! Snowflake DDL Generation Tests
//!
//! Column definitions and CREATE TABLE statements, plus the round trip from a
//! rendered column through `SHOW COLUMNS` metadata back into a `Column`.

mod common;

use common::column_row;
use serde_json::json;
use snowdrift_migrations::{
    CanonicalType, Column, Index, IndexKind, Table, create_table_sql, parse_columns,
    render_column_definition,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn def(column: &Column) -> String {
    render_column_definition(column).unwrap()
}

/// Re-read a column from metadata shaped like Snowflake reports it
fn reintrospect(name: &str, data_type: serde_json::Value, comment: &str) -> Column {
    let rows = vec![column_row(name, data_type, "", comment)];
    parse_columns(&rows).unwrap().remove(0)
}

// =============================================================================
// Column definitions
// =============================================================================

#[test]
fn test_documented_definitions() {
    assert_eq!(
        def(&Column::new("a", "number").precision(9).scale(5)),
        "number(9,5) null"
    );
    assert_eq!(def(&Column::new("a", "number").precision(9)), "number(9,0) null");
    assert_eq!(
        def(&Column::new("a", "varchar").limit(42).collation("en-cs").not_null()),
        "varchar(42) collate 'en-cs' not null"
    );
    assert_eq!(
        def(&Column::new("a", "number").identity_with(111, 222)),
        "number identity(111,222) null"
    );
}

#[test]
fn test_synonyms_render_canonically() {
    let cases = [
        ("bigint", "number null"),
        ("double precision", "float null"),
        ("nvarchar2", "varchar null"),
        ("datetime", "timestamp_ntz null"),
        ("timestamp with local time zone", "timestamp_ltz null"),
        ("timestamptz", "timestamp_tz null"),
        ("object", "object null"),
        ("geography", "geography null"),
    ];
    for (declared, expected) in cases {
        assert_eq!(def(&Column::new("c", declared)), expected, "{declared}");
    }
}

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn test_number_round_trip() {
    let original = Column::new("amount", "decimal")
        .precision(9)
        .scale(5)
        .comment("net");
    assert_eq!(def(&original), "number(9,5) null comment 'net'");

    let back = reintrospect(
        "amount",
        json!({"type": "FIXED", "precision": 9, "scale": 5, "nullable": true}),
        "net",
    );
    assert_eq!(back.canonical_type().unwrap(), original.canonical_type().unwrap());
    assert_eq!((back.precision, back.scale), (original.precision, original.scale));
    assert_eq!(back.nullable, original.nullable);
    assert_eq!(back.comment, original.comment);
    assert_eq!(def(&back), def(&original));
}

#[test]
fn test_varchar_round_trip() {
    let original = Column::new("email", "text").limit(42).not_null();
    let back = reintrospect(
        "email",
        json!({"type": "TEXT", "length": 42, "byteLength": 168, "nullable": false, "fixed": false}),
        "",
    );
    assert_eq!(back.canonical_type().unwrap(), CanonicalType::Varchar);
    assert_eq!(back.limit, original.limit);
    assert!(!back.nullable);
    assert_eq!(def(&back), def(&original));
}

#[test]
fn test_timestamp_round_trip() {
    let original = Column::new("created_at", "timestamp_ltz").precision(3);
    let back = reintrospect(
        "created_at",
        json!({"type": "TIMESTAMP_LTZ", "precision": 0, "scale": 3, "nullable": true}),
        "",
    );
    assert_eq!(def(&back), def(&original));
    assert_eq!(def(&back), "timestamp_ltz(3) null");
}

#[test]
fn test_identity_round_trip() {
    let mut row = column_row(
        "id",
        json!({"type": "FIXED", "precision": 38, "scale": 0, "nullable": false}),
        "",
        "",
    );
    row.insert("autoincrement".into(), json!("IDENTITY START 111 INCREMENT 222 ORDER"));
    let back = parse_columns(&[row]).unwrap().remove(0);
    assert_eq!(def(&back), "number(38,0) identity(111,222) not null");
}

// =============================================================================
// CREATE TABLE
// =============================================================================

#[test]
fn test_create_table_injects_single_primary_key() {
    let sql = create_table_sql(
        &Table::new("users")
            .column(Column::new("email", "varchar").limit(320).not_null())
            .column(Column::new("active", "boolean").default_value(true)),
    )
    .unwrap();
    assert_eq!(
        sql,
        r#"create table "users" ("id" number identity not null, "email" varchar(320) not null, "active" boolean null default true, primary key ("id"))"#
    );
    assert_eq!(sql.matches("primary key").count(), 1);
}

#[test]
fn test_create_table_never_duplicates_primary_key() {
    // Every source at once still yields one clause
    let sql = create_table_sql(
        &Table::new("t")
            .primary_key(["code"])
            .column(Column::new("code", "varchar").not_null().property("primary key"))
            .index(Index::new(IndexKind::PrimaryKey, ["code"])),
    )
    .unwrap();
    assert_eq!(sql.matches("primary key").count(), 1);
    assert!(sql.ends_with(r#"primary key ("code"))"#));
}

#[test]
fn test_create_table_rejects_unknown_types_before_sql() {
    let err = create_table_sql(&Table::new("t").column(Column::new("c", "jsonb"))).unwrap_err();
    assert_eq!(err.to_string(), "unknown column type 'jsonb'");
}
