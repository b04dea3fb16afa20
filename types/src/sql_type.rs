//! Snowflake column type definitions
//!
//! Snowflake accepts a large set of synonyms for a small set of storage types.
//! See: <https://docs.snowflake.com/en/sql-reference/intro-summary-data-types>

use crate::error::UnknownTypeError;
use crate::type_category::TypeFamily;

/// Canonical Snowflake column type, after synonym resolution.
///
/// # Examples
///
/// ```
/// use snowdrift_types::CanonicalType;
///
/// assert_eq!(CanonicalType::resolve("bigint"), Ok(CanonicalType::Number));
/// assert_eq!(CanonicalType::resolve("Double Precision"), Ok(CanonicalType::Float));
/// assert_eq!(CanonicalType::resolve("datetime"), Ok(CanonicalType::TimestampNtz));
/// assert_eq!(CanonicalType::Number.as_str(), "number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CanonicalType {
    /// NUMBER - fixed-point with optional precision and scale
    Number,
    /// FLOAT - double precision floating point
    Float,
    /// VARCHAR - variable length text with optional length and collation
    Varchar,
    /// BOOLEAN
    Boolean,
    /// DATE
    Date,
    /// TIME with optional fractional seconds precision
    Time,
    /// Bare TIMESTAMP, whose flavor follows the TIMESTAMP_TYPE_MAPPING session parameter
    Timestamp,
    /// TIMESTAMP_NTZ - wallclock time without time zone
    TimestampNtz,
    /// TIMESTAMP_LTZ - UTC stored, rendered in the session time zone
    TimestampLtz,
    /// TIMESTAMP_TZ - UTC stored together with an offset
    TimestampTz,
    /// VARIANT - semi-structured value of any type
    Variant,
    /// OBJECT - semi-structured key/value map
    Object,
    /// ARRAY - semi-structured list
    Array,
    /// GEOGRAPHY - spherical geospatial value
    Geography,
    /// GEOMETRY - planar geospatial value
    Geometry,
    /// BINARY with optional byte length
    Binary,
    /// VARBINARY, a synonym Snowflake keeps distinct in DESCRIBE output
    Varbinary,
}

/// Synonym table. Lookups are ASCII case-insensitive.
const SYNONYMS: &[(&str, CanonicalType)] = &[
    // Fixed-point numbers
    ("number", CanonicalType::Number),
    ("decimal", CanonicalType::Number),
    ("numeric", CanonicalType::Number),
    ("int", CanonicalType::Number),
    ("integer", CanonicalType::Number),
    ("bigint", CanonicalType::Number),
    ("smallint", CanonicalType::Number),
    ("tinyint", CanonicalType::Number),
    ("byteint", CanonicalType::Number),
    ("biginteger", CanonicalType::Number),
    // Floating point
    ("float", CanonicalType::Float),
    ("float4", CanonicalType::Float),
    ("float8", CanonicalType::Float),
    ("double", CanonicalType::Float),
    ("double precision", CanonicalType::Float),
    ("real", CanonicalType::Float),
    // Text
    ("varchar", CanonicalType::Varchar),
    ("char", CanonicalType::Varchar),
    ("character", CanonicalType::Varchar),
    ("nchar", CanonicalType::Varchar),
    ("string", CanonicalType::Varchar),
    ("text", CanonicalType::Varchar),
    ("nvarchar", CanonicalType::Varchar),
    ("nvarchar2", CanonicalType::Varchar),
    ("char varying", CanonicalType::Varchar),
    ("nchar varying", CanonicalType::Varchar),
    // Logical and calendar
    ("boolean", CanonicalType::Boolean),
    ("date", CanonicalType::Date),
    ("time", CanonicalType::Time),
    // Timestamps
    ("timestamp", CanonicalType::Timestamp),
    ("timestamp_ntz", CanonicalType::TimestampNtz),
    ("datetime", CanonicalType::TimestampNtz),
    ("timestampntz", CanonicalType::TimestampNtz),
    ("timestamp without time zone", CanonicalType::TimestampNtz),
    ("timestamp_ltz", CanonicalType::TimestampLtz),
    ("timestampltz", CanonicalType::TimestampLtz),
    ("timestamp with local time zone", CanonicalType::TimestampLtz),
    ("timestamp_tz", CanonicalType::TimestampTz),
    ("timestamptz", CanonicalType::TimestampTz),
    ("timestamp with time zone", CanonicalType::TimestampTz),
    // Semi-structured
    ("variant", CanonicalType::Variant),
    ("object", CanonicalType::Object),
    ("array", CanonicalType::Array),
    // Geospatial
    ("geography", CanonicalType::Geography),
    ("geometry", CanonicalType::Geometry),
    // Binary
    ("binary", CanonicalType::Binary),
    ("varbinary", CanonicalType::Varbinary),
];

/// Every type name Snowflake documents for column definitions.
pub const VALID_TYPES: &[&str] = &[
    "number",
    "decimal",
    "numeric",
    "int",
    "integer",
    "bigint",
    "smallint",
    "tinyint",
    "byteint",
    "biginteger",
    "float",
    "float4",
    "float8",
    "double",
    "double precision",
    "real",
    "varchar",
    "char",
    "character",
    "nchar",
    "string",
    "text",
    "nvarchar",
    "nvarchar2",
    "char varying",
    "nchar varying",
    "binary",
    "varbinary",
    "boolean",
    "date",
    "time",
    "timestamp",
    "timestamp_ntz",
    "datetime",
    "timestampntz",
    "timestamp without time zone",
    "timestamp_ltz",
    "timestampltz",
    "timestamp with local time zone",
    "timestamp_tz",
    "timestamptz",
    "timestamp with time zone",
    "variant",
    "object",
    "array",
    "geography",
    "geometry",
];

/// Check a raw type name against the full documented vocabulary.
///
/// ```
/// assert!(snowdrift_types::is_valid_type("NVARCHAR2"));
/// assert!(snowdrift_types::is_valid_type("varbinary"));
/// assert!(!snowdrift_types::is_valid_type("jsonb"));
/// ```
#[must_use]
pub fn is_valid_type(raw: &str) -> bool {
    let raw = raw.trim();
    VALID_TYPES.iter().any(|t| t.eq_ignore_ascii_case(raw))
}

impl CanonicalType {
    /// Resolve a declared type name (or any of its synonyms) to its canonical type.
    ///
    /// Bare `timestamp` resolves to [`CanonicalType::Timestamp`]; use
    /// [`Self::resolve_with_timezone`] when the column carries a time zone flag.
    pub fn resolve(raw: &str) -> Result<Self, UnknownTypeError> {
        let trimmed = raw.trim();
        SYNONYMS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, ty)| *ty)
            .ok_or_else(|| UnknownTypeError::new(raw))
    }

    /// Resolve a declared type, turning bare `timestamp` into `timestamp_tz`
    /// when `timezone` is set.
    pub fn resolve_with_timezone(raw: &str, timezone: bool) -> Result<Self, UnknownTypeError> {
        match Self::resolve(raw)? {
            Self::Timestamp if timezone => Ok(Self::TimestampTz),
            ty => Ok(ty),
        }
    }

    /// Map the `type` tag of a `SHOW COLUMNS` data type descriptor.
    ///
    /// Snowflake reports storage names there: `FIXED`, `TEXT` and `REAL` stand
    /// for number, varchar and float; every other tag is a type name already.
    ///
    /// ```
    /// use snowdrift_types::CanonicalType;
    ///
    /// assert_eq!(CanonicalType::from_introspected("FIXED"), Ok(CanonicalType::Number));
    /// assert_eq!(CanonicalType::from_introspected("TIMESTAMP_LTZ"), Ok(CanonicalType::TimestampLtz));
    /// ```
    pub fn from_introspected(tag: &str) -> Result<Self, UnknownTypeError> {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("fixed") {
            Ok(Self::Number)
        } else if tag.eq_ignore_ascii_case("text") {
            Ok(Self::Varchar)
        } else if tag.eq_ignore_ascii_case("real") {
            Ok(Self::Float)
        } else {
            Self::resolve(tag)
        }
    }

    /// The keyword this type is rendered with in DDL
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Float => "float",
            Self::Varchar => "varchar",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::TimestampNtz => "timestamp_ntz",
            Self::TimestampLtz => "timestamp_ltz",
            Self::TimestampTz => "timestamp_tz",
            Self::Variant => "variant",
            Self::Object => "object",
            Self::Array => "array",
            Self::Geography => "geography",
            Self::Geometry => "geometry",
            Self::Binary => "binary",
            Self::Varbinary => "varbinary",
        }
    }

    /// The family this type belongs to
    #[must_use]
    pub const fn family(&self) -> TypeFamily {
        match self {
            Self::Number => TypeFamily::Numeric,
            Self::Float => TypeFamily::Float,
            Self::Varchar => TypeFamily::String,
            Self::Boolean => TypeFamily::Boolean,
            Self::Date => TypeFamily::Date,
            Self::Time => TypeFamily::Time,
            Self::Timestamp | Self::TimestampNtz | Self::TimestampLtz | Self::TimestampTz => {
                TypeFamily::Timestamp
            }
            Self::Variant | Self::Object | Self::Array => TypeFamily::SemiStructured,
            Self::Geography | Self::Geometry => TypeFamily::Geospatial,
            Self::Binary | Self::Varbinary => TypeFamily::Binary,
        }
    }

    /// Whether DDL for this type carries a length, as in `varchar(42)`
    #[must_use]
    pub const fn takes_limit(&self) -> bool {
        matches!(self, Self::Varchar | Self::Binary | Self::Varbinary)
    }

    /// Whether DDL for this type carries a precision, as in `number(9,5)` or `time(3)`
    #[must_use]
    pub const fn takes_precision(&self) -> bool {
        matches!(
            self,
            Self::Number
                | Self::Time
                | Self::Timestamp
                | Self::TimestampNtz
                | Self::TimestampLtz
                | Self::TimestampTz
        )
    }

    /// Whether this type may be declared as an identity column
    #[must_use]
    pub const fn supports_identity(&self) -> bool {
        matches!(self, Self::Number)
    }

    /// The type Snowflake stores a column of this type as.
    ///
    /// Bare `timestamp` follows the default `TIMESTAMP_TYPE_MAPPING` and is
    /// reported back as `timestamp_ntz`.
    #[must_use]
    pub const fn stored(self) -> Self {
        match self {
            Self::Timestamp => Self::TimestampNtz,
            ty => ty,
        }
    }
}

impl core::fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for CanonicalType {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}
