//! Error types for cursor traversal and table configuration.
//!
//! A missing key is never an error: lookups and removals report it as
//! `None`/`false`.

use thiserror::Error;

/// Failure of a [`CursorMut`](crate::CursorMut) operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum IterError {
    /// `next()` was called with no entries left.
    #[error("cursor exhausted: no further entries")]
    Exhausted,
    /// `remove()` was called before any `next()`, or twice without an
    /// intervening `next()`.
    #[error("invalid cursor state: no entry to remove")]
    InvalidState,
}

/// Rejected [`TableConfig`](crate::TableConfig) value.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
    #[error("load factor must be finite and positive, got {0}")]
    InvalidLoadFactor(f64),
    #[error("grow factor must be at least 2, got {0}")]
    InvalidGrowFactor(usize),
}
