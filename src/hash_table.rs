//! HashTable: public map API over the chained bucket store.

use crate::buckets::{Buckets, EntryKey};
use crate::config::TableConfig;
use crate::cursor::CursorMut;
use crate::error::ConfigError;
use crate::hash::KeyHasher;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use tracing::debug;

/// A single-threaded hash map resolving collisions by chaining.
///
/// Lookups take borrowed forms of the key (`&Q where K: Borrow<Q>`). A
/// table keyed by `Option<T>` may store `None` as an ordinary key; every
/// "not found" result is an `Option`, so it never collides with a stored
/// `None` value either.
pub struct HashTable<K, V> {
    pub(crate) buckets: Buckets<K, V>,
    hasher: KeyHasher,
    config: TableConfig,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::from_valid_config(TableConfig::default())
    }

    /// Start with `capacity` buckets (at least one) and default growth.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_valid_config(TableConfig::default().with_initial_capacity(capacity.max(1)))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TableConfig) -> Self {
        Self {
            buckets: Buckets::with_capacity(config.initial_capacity),
            hasher: KeyHasher::default(),
            config,
        }
    }

    /// Insert `key -> value`, returning the value it replaced.
    ///
    /// Growth is checked before the new entry is counted, so a table at
    /// exactly its load factor accepts one more key before growing.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.grow_if_needed();
        let hash = self.hasher.hash(&key);
        if let Some(pos) = self.buckets.locate(hash, &key) {
            let e = self.buckets.entry_mut(pos.node);
            return Some(core::mem::replace(&mut e.value, value));
        }
        self.buckets.append(key, value, hash);
        None
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.find(q)?;
        Some(&self.buckets.entry(node).value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.find(q)?;
        Some(&mut self.buckets.entry_mut(node).value)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let e = self.buckets.entry(self.find(q)?);
        Some((&e.key, &e.value))
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hasher.hash(q);
        let pos = self.buckets.locate(hash, q)?;
        let e = self.buckets.unlink(pos);
        Some((e.key, e.value))
    }

    /// Keep only the entries for which `f` returns `true`.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cursor = self.cursor_mut();
        while let Ok((k, v)) = cursor.next() {
            if !f(k, v) {
                // The entry was just returned by `next`, so this cannot fail.
                let _ = cursor.remove();
            }
        }
    }

    fn find<Q>(&self, q: &Q) -> Option<EntryKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hasher.hash(q);
        self.buckets.locate(hash, q).map(|pos| pos.node)
    }

    fn grow_if_needed(&mut self) {
        let len = self.buckets.len();
        let capacity = self.buckets.capacity();
        if self.config.needs_growth(len, capacity) {
            let grown = self.config.grown_capacity(capacity);
            debug!(from = capacity, to = grown, len, "growing bucket array");
            self.buckets.regrow(grown);
        }
    }
}

impl<K, V> HashTable<K, V> {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.len() == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Remove every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Iterate in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            bucket: 0,
            cur: self.buckets.head(0),
            remaining: self.buckets.len(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// A cursor that can remove the entry it last returned.
    ///
    /// The cursor borrows the table exclusively, so no other insert or
    /// removal can interleave with the traversal.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut::new(&mut self.buckets)
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V> fmt::Debug for HashTable<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders `[Entry{key=K, value=V}, ...]` in iteration order.
impl<K, V> fmt::Display for HashTable<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "Entry{{key={k}, value={v}}}")?;
        }
        f.write_str("]")
    }
}

/// Iterator over shared entries in `HashTable`.
pub struct Iter<'a, K, V> {
    buckets: &'a Buckets<K, V>,
    bucket: usize,
    cur: Option<EntryKey>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.cur {
                let e = self.buckets.entry(node);
                self.cur = e.next;
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
            if self.bucket + 1 >= self.buckets.capacity() {
                return None;
            }
            self.bucket += 1;
            self.cur = self.buckets.head(self.bucket);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator; drains chains head-first in bucket order.
pub struct IntoIter<K, V> {
    buckets: Buckets<K, V>,
    bucket: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket < self.buckets.capacity() {
            if let Some(e) = self.buckets.pop_head(self.bucket) {
                return Some((e.key, e.value));
            }
            self.bucket += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.buckets.len(), Some(self.buckets.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for HashTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets,
            bucket: 0,
        }
    }
}
