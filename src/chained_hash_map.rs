//! ChainedHashMap: separate chaining over a table of `Vec` buckets with
//! all-at-once rehashing when the load factor would be exceeded.

use crate::config::MapConfig;
use crate::error::KeyNotFound;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

pub(crate) type Bucket<K, V> = Vec<Entry<K, V>>;

fn empty_table<K, V>(bucket_count: usize) -> Vec<Bucket<K, V>> {
    (0..bucket_count).map(|_| Vec::new()).collect()
}

/// A map of keys to values that resolves collisions by chaining.
///
/// A key lives in bucket `hash(key) % bucket_count()`. Inserting a new key
/// that would push `len() / bucket_count()` above the configured maximum
/// first doubles the bucket count and redistributes every entry.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `contains`, `get`, `at`, `at_mut`, `erase` | `O(1)`* |
/// | `insert_or_assign`, `get_or_insert_default` | `O(1)`*, `O(n)` when rehashing |
/// | `clear` | `O(n)` |
///
/// \* Average case; a chain is scanned linearly, so colliding keys cost extra.
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = RandomState> {
    pub(crate) buckets: Vec<Bucket<K, V>>,
    len: usize,
    hasher: S,
    config: MapConfig,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    pub fn with_config(config: MapConfig) -> Self {
        Self::with_config_and_hasher(config, Default::default())
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn max_load_factor(&self) -> f64 {
        self.config.max_load_factor()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// `len / bucket_count` as a real ratio.
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.len as f64 / self.buckets.len() as f64
    }

    /// Drops every entry and restores the initial bucket count.
    pub fn clear(&mut self) {
        log::trace!(
            "clearing {} entries, resetting {} buckets to {}",
            self.len,
            self.buckets.len(),
            self.config.initial_buckets()
        );
        self.buckets = empty_table(self.config.initial_buckets());
        self.len = 0;
    }

    /// Iterates entries bucket by bucket. The order is unspecified and
    /// changes across rehashes and erasures.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.buckets.iter().flatten(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.buckets.iter_mut().flatten(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.iter_mut().map(|(_, v)| v)
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(MapConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: MapConfig, hasher: S) -> Self {
        Self {
            buckets: empty_table(config.initial_buckets()),
            len: 0,
            hasher,
            config,
        }
    }

    pub(crate) fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(q) % self.buckets.len() as u64) as usize
    }

    fn entry<Q>(&self, q: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.buckets[self.bucket_index(q)]
            .iter()
            .find(|e| e.key.borrow() == q)
    }

    fn entry_mut<Q>(&mut self, q: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        self.buckets[index]
            .iter_mut()
            .find(|e| e.key.borrow() == q)
    }

    /// Grows the table if one more entry would exceed the max load factor.
    /// Runs before the target bucket is scanned, so it also fires when the
    /// key turns out to be present already.
    fn maybe_rehash_for_insert(&mut self) {
        let max = self.config.max_load_factor();
        let next_len = (self.len + 1) as f64;
        let mut target = self.buckets.len();
        while next_len / target as f64 > max {
            match target.checked_mul(2) {
                Some(doubled) => target = doubled,
                None => break,
            }
        }
        if target != self.buckets.len() {
            self.rehash(target);
        }
    }

    fn rehash(&mut self, new_bucket_count: usize) {
        log::debug!(
            "rehashing {} entries: {} -> {} buckets",
            self.len,
            self.buckets.len(),
            new_bucket_count
        );
        let old = std::mem::replace(&mut self.buckets, empty_table(new_bucket_count));
        for entry in old.into_iter().flatten() {
            let index = self.bucket_index(&entry.key);
            self.buckets[index].push(entry);
        }
    }

    /// Inserts `key` or overwrites its value. Returns `true` if the key was
    /// new; the stored key is kept when it already existed.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> bool {
        self.maybe_rehash_for_insert();
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        if let Some(e) = bucket.iter_mut().find(|e| e.key == key) {
            e.value = value;
            return false;
        }
        bucket.push(Entry { key, value });
        self.len += 1;
        true
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entry(q).is_some()
    }

    /// Returns a copy of the value, `None` when absent.
    pub fn get<Q>(&self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.entry(q).map(|e| e.value.clone())
    }

    pub fn at<Q>(&self, q: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entry(q).map(|e| &e.value).ok_or(KeyNotFound)
    }

    pub fn at_mut<Q>(&mut self, q: &Q) -> Result<&mut V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entry_mut(q).map(|e| &mut e.value).ok_or(KeyNotFound)
    }

    /// Returns the value for `key`, inserting `V::default()` first if absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.maybe_rehash_for_insert();
        let index = self.bucket_index(&key);
        if let Some(pos) = self.buckets[index].iter().position(|e| e.key == key) {
            return &mut self.buckets[index][pos].value;
        }
        self.len += 1;
        let bucket = &mut self.buckets[index];
        bucket.push(Entry {
            key,
            value: V::default(),
        });
        let last = bucket.len() - 1;
        &mut bucket[last].value
    }

    /// Removes `q`'s entry by moving the bucket's last entry into its slot.
    /// Never shrinks the table.
    pub fn erase<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        let bucket = &mut self.buckets[index];
        match bucket.iter().position(|e| e.key.borrow() == q) {
            Some(pos) => {
                bucket.swap_remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert_or_assign(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

/// Iterator over immutable entries in `ChainedHashMap`.
pub struct Iter<'a, K, V> {
    it: core::iter::Flatten<core::slice::Iter<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.it.next()?;
        self.remaining -= 1;
        Some((&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over mutable entries in `ChainedHashMap`.
pub struct IterMut<'a, K, V> {
    it: core::iter::Flatten<core::slice::IterMut<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.it.next()?;
        self.remaining -= 1;
        Some((&e.key, &mut e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
