//! chain-hashmap: a single-threaded HashMap that resolves collisions by
//! separate chaining and keeps average operations O(1) by rehashing.
//!
//! Internal Design:
//!
//! Layout
//! - The table is a `Vec` of buckets; each bucket is a `Vec` of owned
//!   `(key, value)` entries. No pointer chains, no per-entry allocation.
//! - A key's bucket is `hash(key) % bucket_count` where the hash comes from
//!   the map's `S: BuildHasher` (default `RandomState`).
//! - `len` is tracked separately and always equals the sum of bucket lengths.
//!
//! Growth
//! - Before any operation that may add a key (`insert_or_assign`,
//!   `get_or_insert_default`), the map checks whether `(len + 1) /
//!   bucket_count` would exceed the max load factor and, if so, doubles the
//!   bucket count and moves every entry to its recomputed bucket.
//! - The rehash happens all at once inside the triggering call.
//! - Erasing never shrinks the table; `clear` restores the initial size.
//!
//! Removal
//! - `erase` swaps the bucket's last entry into the vacated slot, so order
//!   within a bucket is not stable.
//!
//! Absence
//! - `contains`/`get`/`erase` report absence as `bool`/`Option`.
//! - `at`/`at_mut` return `Err(KeyNotFound)`.
//!
//! Notes and non-goals
//! - Not thread-safe internally; mutation needs `&mut self`.
//! - No shrinking, incremental rehashing or persistence.
//! - Keys are immutable post-insert; there is no `key_mut`.
//!
//! Sizing is set through [`MapConfig`]; the defaults are
//! [`DEFAULT_BUCKET_COUNT`] buckets and a max load factor of
//! [`DEFAULT_MAX_LOAD_FACTOR`].

pub mod chained_hash_map;
mod chained_hash_map_proptest;
pub mod config;
pub mod error;

// Public surface
pub use chained_hash_map::{ChainedHashMap, Iter, IterMut};
pub use config::{MapConfig, DEFAULT_BUCKET_COUNT, DEFAULT_MAX_LOAD_FACTOR, MIN_MAX_LOAD_FACTOR};
pub use error::{ConfigError, KeyNotFound};
