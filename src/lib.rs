#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// FNV-1a hashing.
///
/// This module provides the deterministic FNV-1a `Hasher`/`BuildHasher`
/// pair used as the fallback default hasher.
pub mod fnv;

/// A hash map built on the open-addressing `HashTable`.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

/// A hash set built on the open-addressing `HashTable`.
///
/// This module provides a `HashSet` that wraps the `HashTable` and provides
/// a standard set interface with configurable hashers.
pub mod hash_set;

pub mod hash_table;

/// The raw-allocator seam used by the hash table for all storage.
pub mod raw_alloc;

pub use fnv::FnvBuildHasher;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use raw_alloc::AllocError;
pub use raw_alloc::Global;
pub use raw_alloc::RawAllocator;

/// The hasher state used when none is specified.
///
/// With the `foldhash` feature (on by default) this is foldhash's fast
/// randomized state; otherwise it is the crate's deterministic FNV-1a
/// builder.
#[cfg(feature = "foldhash")]
pub type DefaultHashBuilder = foldhash::fast::RandomState;

/// The hasher state used when none is specified.
///
/// Without the `foldhash` feature this is the crate's deterministic FNV-1a
/// builder.
#[cfg(not(feature = "foldhash"))]
pub type DefaultHashBuilder = fnv::FnvBuildHasher;
