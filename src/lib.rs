#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod config;
mod equivalence;
mod error;

/// A fixed-capacity HashMap over the segmented table.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a key-value map interface with configurable hashers and key equivalence.
pub mod hash_map;

/// A fixed-capacity hash set over the segmented table.
pub mod hash_set;

pub mod hash_table;

pub mod probe;

pub use config::DEFAULT_CAPACITY;
pub use config::DEFAULT_SEGMENT_SIZE;
pub use config::TableConfig;
pub use equivalence::KeyEquivalence;
pub use equivalence::NaturalEq;
pub use error::TableError;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hasher builder used when none is supplied.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// Hasher builder used when none is supplied.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    }
}
