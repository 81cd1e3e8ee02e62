//! Configuration collection handling
//!
//! Configuration entries live in named collections. The default
//! (unnamed) collection is represented by the empty string. Collections
//! whose names match an exclusion pattern are invisible to changelist,
//! export, and import operations.

mod filter;

pub use filter::{CollectionFilter, FilterError, DEFAULT_EXCLUDE_PATTERNS};

/// Name of the default (unnamed) collection.
pub const DEFAULT_COLLECTION: &str = "";
