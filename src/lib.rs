//! chained-hashmap: a single-threaded hash map that resolves collisions by
//! chaining and offers a cursor able to remove entries mid-traversal.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container with amortized O(1) operations
//!   whose only subtle parts (bucket bookkeeping, growth, and removal
//!   during iteration) are each isolated in one module.
//! - Layers:
//!   - Buckets<K, V>: structural layer. Entries live in a generational
//!     arena (`slotmap`); each bucket stores the arena key of its chain
//!     head and each entry stores the key of its successor. Provides
//!     locate/append/unlink/regrow.
//!   - HashTable<K, V>: public API. Owns the buckets, the fixed hasher and
//!     the growth policy (`TableConfig`).
//!   - CursorMut<'_, K, V>: traversal that remembers the predecessor of
//!     the entry it returned so `remove` can unlink in O(1).
//!
//! Constraints
//! - Single-threaded. No interior mutability, no `unsafe`.
//! - Unique keys: `put` on an existing key replaces the value and returns
//!   the old one.
//! - Every "not found" is an `Option::None`, never an overloaded value.
//!
//! Hashing
//! - Keys are hashed once with a fixed builder into the `i64` domain;
//!   `i64::MIN` is folded to `0`. The result is cached in the entry and
//!   growth re-homes entries from the cached hash, so `K: Hash` is never
//!   invoked after insertion.
//! - Bucket index is `hash.rem_euclid(capacity)`.
//!
//! Growth
//! - Before each `put`, if `len / capacity > load_factor` the bucket array
//!   is multiplied by `grow_factor`. Entries are drained bucket by bucket
//!   and appended at the tails of their new chains, so entries that land
//!   in the same new chain keep their relative order.
//!
//! Iteration and mutation
//! - `iter()` and the owning iterator walk buckets in order, then chains.
//! - `cursor_mut()` borrows the table exclusively, which rules out
//!   external `put`/`remove` while a traversal is in progress.
//!
//! Notes and non-goals
//! - No custom hasher parameter; no serialization.
//! - A table keyed by `Option<T>` may use `None` as an ordinary key.

mod buckets;
pub mod config;
mod cursor;
pub mod error;
mod hash;
pub mod hash_table;
mod hash_table_proptest;

// Public surface
pub use config::{TableConfig, GROW_FACTOR, INITIAL_CAPACITY, LOAD_FACTOR};
pub use cursor::CursorMut;
pub use error::{ConfigError, IterError};
pub use hash_table::HashTable;
