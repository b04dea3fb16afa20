//! Type resolution errors

#[allow(unused_imports)]
use crate::alloc_prelude::*;

/// Error returned when a declared column type matches none of the known
/// Snowflake synonym groups.
///
/// # Examples
///
/// ```
/// use snowdrift_types::CanonicalType;
///
/// let err = CanonicalType::resolve("money").unwrap_err();
/// assert_eq!(err.raw_type(), "money");
/// assert_eq!(err.to_string(), "unknown column type 'money'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTypeError {
    raw: String,
}

impl UnknownTypeError {
    /// Create an error for the given raw type name
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The type name that failed to resolve, as supplied by the caller
    #[must_use]
    pub fn raw_type(&self) -> &str {
        &self.raw
    }
}

impl core::fmt::Display for UnknownTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown column type '{}'", self.raw)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownTypeError {}
