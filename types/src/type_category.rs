//! Snowflake type families
//!
//! Groups canonical types by how their values behave in DDL: whether a
//! default literal is quoted, and which ALTER COLUMN rewrites apply.

/// Coarse classification of canonical types.
///
/// # Examples
///
/// ```
/// use snowdrift_types::{CanonicalType, TypeFamily};
///
/// assert_eq!(CanonicalType::Number.family(), TypeFamily::Numeric);
/// assert!(TypeFamily::Numeric.has_bare_literals());
/// assert!(TypeFamily::Timestamp.has_quoted_literals());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TypeFamily {
    /// NUMBER and its integer/decimal synonyms
    Numeric,
    /// FLOAT and its synonyms
    Float,
    /// VARCHAR and its synonyms
    String,
    /// BOOLEAN
    Boolean,
    /// DATE
    Date,
    /// TIME
    Time,
    /// All TIMESTAMP flavors
    Timestamp,
    /// VARIANT, OBJECT, ARRAY
    SemiStructured,
    /// GEOGRAPHY, GEOMETRY
    Geospatial,
    /// BINARY, VARBINARY
    Binary,
}

impl TypeFamily {
    /// Default literals for these families are written without quotes
    #[must_use]
    pub const fn has_bare_literals(&self) -> bool {
        matches!(self, Self::Numeric | Self::Float)
    }

    /// Default literals for these families are single-quoted strings
    #[must_use]
    pub const fn has_quoted_literals(&self) -> bool {
        matches!(
            self,
            Self::String | Self::Date | Self::Time | Self::Timestamp
        )
    }

    /// Whether values of this family are dates, times or timestamps
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CanonicalType;

    #[test]
    fn test_literal_styles_are_exclusive() {
        let all = [
            TypeFamily::Numeric,
            TypeFamily::Float,
            TypeFamily::String,
            TypeFamily::Boolean,
            TypeFamily::Date,
            TypeFamily::Time,
            TypeFamily::Timestamp,
            TypeFamily::SemiStructured,
            TypeFamily::Geospatial,
            TypeFamily::Binary,
        ];
        for family in all {
            assert!(
                !(family.has_bare_literals() && family.has_quoted_literals()),
                "{family:?}"
            );
        }
    }

    #[test]
    fn test_timestamp_flavors_share_a_family() {
        for ty in [
            CanonicalType::Timestamp,
            CanonicalType::TimestampNtz,
            CanonicalType::TimestampLtz,
            CanonicalType::TimestampTz,
        ] {
            assert_eq!(ty.family(), TypeFamily::Timestamp);
            assert!(ty.family().is_temporal());
        }
        assert!(!TypeFamily::Boolean.is_temporal());
    }
}
