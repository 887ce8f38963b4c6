//! Buckets: structural layer holding chained entries in a generational arena.
//!
//! Every entry lives in a `SlotMap`; a bucket is just the arena key of its
//! chain head and each entry carries the key of its successor. Unlinking is
//! therefore a matter of rewriting one `next` field (or one head) once the
//! predecessor is known, and nothing here needs back-pointers.

use crate::hash::bucket_index;
use core::borrow::Borrow;
use slotmap::{DefaultKey, SlotMap};

pub(crate) type EntryKey = DefaultKey;

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: i64,
    pub(crate) next: Option<EntryKey>,
}

/// Where an entry sits: its bucket, its predecessor in the chain (`None`
/// when it is the head), and its own arena key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Position {
    pub(crate) bucket: usize,
    pub(crate) prev: Option<EntryKey>,
    pub(crate) node: EntryKey,
}

pub(crate) struct Buckets<K, V> {
    heads: Vec<Option<EntryKey>>,
    slots: SlotMap<EntryKey, Entry<K, V>>,
}

impl<K, V> Buckets<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            heads: vec![None; capacity],
            slots: SlotMap::with_key(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.heads.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn head(&self, bucket: usize) -> Option<EntryKey> {
        self.heads[bucket]
    }

    #[inline]
    pub(crate) fn entry(&self, node: EntryKey) -> &Entry<K, V> {
        &self.slots[node]
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, node: EntryKey) -> &mut Entry<K, V> {
        &mut self.slots[node]
    }

    /// Walk the chain for `hash` and return the matching entry's position.
    /// The cached hash is compared before calling `K: Eq`.
    pub(crate) fn locate<Q>(&self, hash: i64, q: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let bucket = bucket_index(hash, self.capacity());
        let mut prev = None;
        let mut cur = self.heads[bucket];
        while let Some(node) = cur {
            let e = &self.slots[node];
            if e.hash == hash && e.key.borrow() == q {
                return Some(Position { bucket, prev, node });
            }
            prev = Some(node);
            cur = e.next;
        }
        None
    }

    /// Append a new entry at the tail of its chain, creating the chain when
    /// the bucket is empty.
    pub(crate) fn append(&mut self, key: K, value: V, hash: i64) -> EntryKey {
        let bucket = bucket_index(hash, self.capacity());
        let node = self.slots.insert(Entry {
            key,
            value,
            hash,
            next: None,
        });
        self.link_tail(bucket, node);
        node
    }

    fn link_tail(&mut self, bucket: usize, node: EntryKey) {
        let Some(mut tail) = self.heads[bucket] else {
            self.heads[bucket] = Some(node);
            return;
        };
        while let Some(next) = self.slots[tail].next {
            tail = next;
        }
        self.slots[tail].next = Some(node);
    }

    /// Detach the entry at `pos` and hand it back. `pos.prev` must be the
    /// entry's current predecessor.
    pub(crate) fn unlink(&mut self, pos: Position) -> Entry<K, V> {
        // Invariant of this module: positions are only produced for live entries.
        let entry = self
            .slots
            .remove(pos.node)
            .expect("position must refer to a live entry");
        match pos.prev {
            None => {
                debug_assert_eq!(self.heads[pos.bucket], Some(pos.node));
                self.heads[pos.bucket] = entry.next;
            }
            Some(prev) => {
                let p = &mut self.slots[prev];
                debug_assert_eq!(p.next, Some(pos.node));
                p.next = entry.next;
            }
        }
        entry
    }

    /// Re-home every entry into `new_capacity` buckets using the cached
    /// hashes. Buckets are drained in order and entries appended at the new
    /// tails, so entries that shared a chain keep their relative order.
    pub(crate) fn regrow(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity > 0);
        let mut heads: Vec<Option<EntryKey>> = vec![None; new_capacity];
        let mut tails: Vec<Option<EntryKey>> = vec![None; new_capacity];

        for bucket in 0..self.heads.len() {
            let mut cur = self.heads[bucket];
            while let Some(node) = cur {
                let e = &mut self.slots[node];
                cur = e.next.take();
                let b = bucket_index(e.hash, new_capacity);
                match tails[b] {
                    None => heads[b] = Some(node),
                    Some(t) => self.slots[t].next = Some(node),
                }
                tails[b] = Some(node);
            }
        }

        self.heads = heads;
    }

    /// Drop every entry; the bucket count is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.heads.iter_mut().for_each(|h| *h = None);
    }

    /// Pop the head of `bucket`, for draining in chain order.
    pub(crate) fn pop_head(&mut self, bucket: usize) -> Option<Entry<K, V>> {
        let node = self.heads[bucket]?;
        Some(self.unlink(Position {
            bucket,
            prev: None,
            node,
        }))
    }

    #[cfg(test)]
    pub(crate) fn chain(&self, bucket: usize) -> Vec<&K> {
        let mut out = Vec::new();
        let mut cur = self.heads[bucket];
        while let Some(node) = cur {
            out.push(&self.slots[node].key);
            cur = self.slots[node].next;
        }
        out
    }
}
