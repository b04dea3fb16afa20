//! Snowflake data type vocabulary for snowdrift
//!
//! This crate owns everything snowdrift knows about Snowflake column types:
//!
//! - [`CanonicalType`] - the normalized type names DDL is rendered with
//! - [`TypeFamily`] - coarse grouping used for literal quoting and ALTER rules
//! - [`is_valid_type`] - membership check over the full documented vocabulary
//! - [`UnknownTypeError`] - returned for names outside every synonym group
//!
//! # Features
//!
//! - `std` - Standard library support (enabled by default)
//! - `alloc` - Allocator support for no_std environments
//! - `serde` - Enable serde serialization/deserialization

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

// Internal prelude for std/alloc compatibility
#[allow(unused_imports)]
pub(crate) mod alloc_prelude {
    #[cfg(feature = "std")]
    pub use std::{
        string::{String, ToString},
        vec::Vec,
    };

    #[cfg(all(feature = "alloc", not(feature = "std")))]
    pub use alloc::{
        string::{String, ToString},
        vec::Vec,
    };
}

mod error;
mod sql_type;
mod type_category;

pub use error::UnknownTypeError;
pub use sql_type::{CanonicalType, VALID_TYPES, is_valid_type};
pub use type_category::TypeFamily;

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{CanonicalType, TypeFamily, UnknownTypeError, is_valid_type};
}
