//! Key hashing and bucket addressing.
//!
//! Hashes live in the `i64` domain. `i64::MIN` is folded to `0` so that no
//! code path has to reason about the one value without a positive
//! counterpart; the same normalized value is cached in each entry and
//! reused when the bucket array grows.

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Fixed hash builder shared by every table. Deterministic within a
/// process run, so bucket order is stable for a given insertion history.
#[derive(Clone, Default)]
pub(crate) struct KeyHasher(DefaultHashBuilder);

impl KeyHasher {
    pub(crate) fn hash<Q>(&self, q: &Q) -> i64
    where
        Q: ?Sized + Hash,
    {
        normalize(self.0.hash_one(q))
    }
}

#[inline]
pub(crate) fn normalize(raw: u64) -> i64 {
    let h = raw as i64;
    if h == i64::MIN {
        0
    } else {
        h
    }
}

/// Bucket for `hash` in an array of `capacity` buckets. `capacity` must be
/// non-zero.
#[inline]
pub(crate) fn bucket_index(hash: i64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    hash.rem_euclid(capacity as i64) as usize
}
