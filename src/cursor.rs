//! CursorMut: bucket-scanning cursor that can unlink the entry it returned.
//!
//! The cursor keeps the predecessor of its upcoming entry alongside the
//! entry itself. When `next` hands out an entry it records that
//! `(bucket, predecessor, entry)` triple, which is everything `remove`
//! needs to unlink in O(1) without walking the chain again.

use crate::buckets::{Buckets, EntryKey, Position};
use crate::error::IterError;
use tracing::trace;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Phase {
    /// No bucket has been looked at yet.
    BeforeBucketScan,
    /// Scanning; `upcoming` is the next entry of bucket `bucket`, or `None`
    /// when that chain is used up.
    Positioned,
    /// Every bucket has been scanned.
    Exhausted,
}

/// Mutable traversal over a [`HashTable`](crate::HashTable) with support
/// for removing the most recently returned entry.
///
/// Obtained from [`HashTable::cursor_mut`](crate::HashTable::cursor_mut).
/// Entries are visited in bucket order, then chain order. Removing an entry
/// never causes a later entry to be skipped or repeated.
pub struct CursorMut<'a, K, V> {
    buckets: &'a mut Buckets<K, V>,
    phase: Phase,
    bucket: usize,
    prev: Option<EntryKey>,
    upcoming: Option<EntryKey>,
    // Entry returned by the last `next`, cleared by `remove`.
    last: Option<Position>,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) fn new(buckets: &'a mut Buckets<K, V>) -> Self {
        Self {
            buckets,
            phase: Phase::BeforeBucketScan,
            bucket: 0,
            prev: None,
            upcoming: None,
            last: None,
        }
    }

    /// Whether another entry remains. Scans forward over empty buckets as
    /// needed; repeated calls without `next` do not move the cursor.
    pub fn has_next(&mut self) -> bool {
        if self.phase == Phase::BeforeBucketScan {
            self.phase = Phase::Positioned;
            self.bucket = 0;
            self.prev = None;
            self.upcoming = self.buckets.head(0);
        }
        loop {
            if self.upcoming.is_some() {
                return true;
            }
            if self.phase == Phase::Exhausted {
                return false;
            }
            if self.bucket + 1 >= self.buckets.capacity() {
                self.phase = Phase::Exhausted;
                return false;
            }
            self.bucket += 1;
            self.prev = None;
            self.upcoming = self.buckets.head(self.bucket);
        }
    }

    /// Return the next entry, or [`IterError::Exhausted`] when none is left.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<(&K, &mut V), IterError> {
        if !self.has_next() {
            return Err(IterError::Exhausted);
        }
        let Some(node) = self.upcoming else {
            return Err(IterError::Exhausted);
        };
        self.last = Some(Position {
            bucket: self.bucket,
            prev: self.prev,
            node,
        });
        self.prev = Some(node);
        let e = self.buckets.entry_mut(node);
        self.upcoming = e.next;
        Ok((&e.key, &mut e.value))
    }

    /// Unlink the entry returned by the last `next` and hand it back.
    ///
    /// Fails with [`IterError::InvalidState`] before the first `next` and
    /// on a second call without an intervening `next`.
    pub fn remove(&mut self) -> Result<(K, V), IterError> {
        let pos = self.last.take().ok_or(IterError::InvalidState)?;
        // If the cursor is still in the same chain, the removed entry's
        // predecessor now precedes `upcoming`.
        if self.prev == Some(pos.node) {
            self.prev = pos.prev;
        }
        trace!(bucket = pos.bucket, "cursor unlinked entry");
        let e = self.buckets.unlink(pos);
        Ok((e.key, e.value))
    }
}
