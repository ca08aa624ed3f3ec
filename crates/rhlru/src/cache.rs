//! Bounded LRU cache over a node arena and a robin-hood table
//!
//! The arena keeps recency order, the table maps keys to arena slots. Both
//! grow together and never shrink. Slots beyond the live entries stay linked
//! at the least recently used end as a reservoir, so inserting into a cache
//! with free slots and recycling an evicted slot are the same operation:
//! take the tail.

use std::fmt;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use equivalent::Equivalent;

use crate::arena::{Arena, SENTINEL};
use crate::error::{Error, Result};
use crate::iter::{Iter, IterMut, Keys, Values, ValuesMut};
use crate::table::{buckets_for, fold_hash, RobinHoodTable};

/// Largest capacity addressable by the 32-bit node index (slot 0 is the sentinel)
pub const MAX_CAPACITY: usize = u32::MAX as usize - 1;

/// Entry pushed out of the cache by [`LruCache::put_with_evicted`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Displaced<K, V> {
    /// The key was already present; carries the caller's key and the old value
    Replaced {
        /// Key passed to the insert
        key: K,
        /// Value held before the overwrite
        value: V,
    },
    /// A live least recently used entry was evicted to make room
    Evicted {
        /// Key of the evicted entry
        key: K,
        /// Value of the evicted entry
        value: V,
    },
}

impl<K, V> Displaced<K, V> {
    /// Whether this was an eviction rather than an overwrite
    pub fn is_evicted(&self) -> bool {
        matches!(self, Displaced::Evicted { .. })
    }

    /// Key and value of the displaced entry
    pub fn into_inner(self) -> (K, V) {
        match self {
            Displaced::Replaced { key, value } | Displaced::Evicted { key, value } => (key, value),
        }
    }
}

/// Arena length to grow to once `used` entries fill the current one
fn target_len(used: usize) -> usize {
    if used < 8 {
        16
    } else if used < 32768 {
        65536
    } else {
        used * 3 / 2
    }
}

/// LRU cache with a configurable growth ceiling
///
/// Lookups accept any `Q: Hash + Equivalent<K>`, so a cache keyed by `String`
/// can be queried with `&str`, and custom query types only need a one-way
/// `Equivalent<K>` impl whose hash matches the stored key's.
pub struct LruCache<K, V, S = RandomState> {
    arena: Arena<K, V>,
    table: RobinHoodTable,
    capacity: usize,
    used: usize,
    hash_builder: S,
}

impl<K, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries
    ///
    /// Nothing is allocated until the first insert.
    ///
    /// # Panics
    /// If `capacity` exceeds [`MAX_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, RandomState::new())
    }

    /// Fallible variant of [`LruCache::new`]
    pub fn try_new(capacity: usize) -> Result<Self> {
        Self::try_with_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> LruCache<K, V, S> {
    /// Create a cache using `hash_builder` to hash keys
    ///
    /// # Panics
    /// If `capacity` exceeds [`MAX_CAPACITY`].
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        assert!(
            capacity <= MAX_CAPACITY,
            "Capacity must not exceed {MAX_CAPACITY}"
        );
        Self {
            arena: Arena::new(),
            table: RobinHoodTable::new(),
            capacity,
            used: 0,
            hash_builder,
        }
    }

    /// Fallible variant of [`LruCache::with_hasher`]
    pub fn try_with_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        if capacity > MAX_CAPACITY {
            return Err(Error::CapacityTooLarge(capacity));
        }
        Ok(Self::with_hasher(capacity, hash_builder))
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.used
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Growth ceiling
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the growth ceiling
    ///
    /// Takes effect on the next growth: lowering it evicts nothing and
    /// releases no storage, raising it allocates nothing up front.
    ///
    /// # Panics
    /// If `capacity` exceeds [`MAX_CAPACITY`].
    pub fn set_capacity(&mut self, capacity: usize) {
        assert!(
            capacity <= MAX_CAPACITY,
            "Capacity must not exceed {MAX_CAPACITY}"
        );
        self.capacity = capacity;
    }

    /// Fallible variant of [`LruCache::set_capacity`]
    pub fn try_set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity > MAX_CAPACITY {
            return Err(Error::CapacityTooLarge(capacity));
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Hash builder used for keys
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Drop every entry, keeping the allocated storage
    pub fn clear(&mut self) {
        self.arena.clear_entries();
        self.table.clear();
        self.used = 0;
    }

    /// Entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.used)
    }

    /// Mutable entries from most to least recently used
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.arena, self.used)
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Values from most to least recently used
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Mutable values from most to least recently used
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Grow arena and table together to `new_len` arena slots
    ///
    /// Also performs the first allocation, when both are still empty.
    fn grow_and_rehash(&mut self, new_len: usize) {
        let old_len = self.arena.len();
        self.arena.grow(new_len);

        let buckets = buckets_for(new_len);
        if buckets > self.table.len() {
            self.table.resize(buckets);
        }
        tracing::debug!(
            old_len,
            new_len,
            buckets = self.table.len(),
            "grew cache storage"
        );
    }

    /// Ensure a slot is available for one more entry, within `capacity`
    fn reserve_one(&mut self) {
        if self.used + 1 < self.arena.len() {
            return;
        }
        let new_len = self.capacity.min(target_len(self.used)) + 1;
        if new_len > self.arena.len() {
            self.grow_and_rehash(new_len);
        }
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn subhash<Q>(&self, key: &Q) -> u32
    where
        Q: Hash + ?Sized,
    {
        fold_hash(self.hash_builder.hash_one(key))
    }

    /// Table position and arena slot of `key`
    fn find<Q>(&self, key: &Q) -> Option<(usize, u32)>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let subhash = self.subhash(key);
        let arena = &self.arena;
        let pos = self.table.find(subhash, |idx| {
            arena
                .entry(idx)
                .is_some_and(|(stored, _)| key.equivalent(stored))
        })?;
        Some((pos, self.table.index_at(pos)))
    }

    /// Check if `key` is cached, without touching recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Get a value and mark it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let (_, idx) = self.find(key)?;
        self.arena.move_to_front(idx);
        self.arena.entry(idx).map(|(_, v)| v)
    }

    /// Mutable variant of [`LruCache::get`]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let (_, idx) = self.find(key)?;
        self.arena.move_to_front(idx);
        self.arena.entry_mut(idx).map(|(_, v)| v)
    }

    /// Get a value without changing its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let (_, idx) = self.find(key)?;
        self.arena.entry(idx).map(|(_, v)| v)
    }

    /// Mutable variant of [`LruCache::peek`]
    pub fn peek_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let (_, idx) = self.find(key)?;
        self.arena.entry_mut(idx).map(|(_, v)| v)
    }

    /// Overwrite the value of an existing key and mark it most recently used
    ///
    /// Returns `false` and leaves the cache untouched if the key is absent.
    pub fn update<Q>(&mut self, key: &Q, value: V) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let Some((_, idx)) = self.find(key) else {
            return false;
        };
        if let Some((_, slot)) = self.arena.entry_mut(idx) {
            *slot = value;
        }
        self.arena.move_to_front(idx);
        true
    }

    /// Same as [`LruCache::update`]
    pub fn refresh<Q>(&mut self, key: &Q, value: V) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.update(key, value)
    }

    /// Insert or overwrite an entry and mark it most recently used
    ///
    /// Whatever gets displaced is dropped before returning.
    pub fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    /// Insert like [`LruCache::put`], handing back the displaced entry
    ///
    /// Returns `None` when the entry took a free slot (or `capacity` is 0).
    pub fn put_with_evicted(&mut self, key: K, value: V) -> Option<Displaced<K, V>> {
        self.insert(key, value)
    }

    fn insert(&mut self, key: K, value: V) -> Option<Displaced<K, V>> {
        if let Some((_, idx)) = self.find(&key) {
            let (_, slot) = self.arena.entry_mut(idx)?;
            let old = std::mem::replace(slot, value);
            self.arena.move_to_front(idx);
            return Some(Displaced::Replaced { key, value: old });
        }

        self.reserve_one();
        let idx = self.arena.tail();
        if idx == SENTINEL {
            // capacity 0: nothing to store into
            return None;
        }

        let displaced = match self.arena.take(idx) {
            Some((old_key, old_value)) => {
                let old_subhash = self.subhash(&old_key);
                if let Some(pos) = self.table.find_index(old_subhash, idx) {
                    self.table.remove_at(pos);
                }
                Some(Displaced::Evicted {
                    key: old_key,
                    value: old_value,
                })
            }
            None => {
                self.used += 1;
                None
            }
        };

        let subhash = self.subhash(&key);
        self.arena.set(idx, key, value);
        self.table.insert(subhash, idx);
        self.arena.move_to_front(idx);
        displaced
    }

    /// Remove `key`, returning its value
    pub fn pop<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let (pos, idx) = self.find(key)?;
        self.table.remove_at(pos);
        // Back to the reservoir end; the next insert reuses this slot
        self.arena.move_to_back(idx);
        self.used -= 1;
        self.arena.take(idx).map(|(_, v)| v)
    }

    /// Remove `key`; returns whether it was present
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.pop(key).is_some()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for LruCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut LruCache<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Assert the structural invariants tying the arena, ring and table together
    pub(crate) fn check_invariants(&self) {
        let arena_len = self.arena.len();
        assert!(self.used <= arena_len.saturating_sub(1));
        if arena_len > 0 {
            assert!(self.table.len() >= buckets_for(arena_len));
        }

        // Ring: visits every non-sentinel slot once, live ones first
        let mut idx = self.arena.head();
        let mut prev = SENTINEL;
        let mut seen = 0;
        while idx != SENTINEL {
            let node = self.arena.node(idx);
            assert_eq!(node.prev, prev, "broken back link at {idx}");
            assert_eq!(node.entry.is_some(), seen < self.used, "live/reservoir split at {idx}");
            if let Some((key, _)) = &node.entry {
                let subhash = self.subhash(key);
                let pos = self.table.find_index(subhash, idx);
                assert!(pos.is_some(), "live slot {idx} has no bucket");
            }
            prev = idx;
            idx = node.next;
            seen += 1;
        }
        assert_eq!(self.arena.tail(), prev);
        assert_eq!(seen, arena_len.saturating_sub(1));

        let occupied = self.table.buckets().iter().filter(|b| b.index != 0).count();
        assert_eq!(occupied, self.used, "stale buckets");
    }

    pub(crate) fn arena_len(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of<S>(cache: &LruCache<i32, i32, S>) -> Vec<i32> {
        cache.keys().copied().collect()
    }

    #[test]
    fn test_target_len() {
        assert_eq!(target_len(0), 16);
        assert_eq!(target_len(7), 16);
        assert_eq!(target_len(8), 65536);
        assert_eq!(target_len(32767), 65536);
        assert_eq!(target_len(32768), 49152);
        assert_eq!(target_len(100_000), 150_000);
    }

    #[test]
    fn test_lazy_allocation() {
        let cache: LruCache<i32, i32> = LruCache::new(100);
        assert_eq!(cache.arena_len(), 0);
        assert_eq!(cache.bucket_count(), 0);
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_growth_steps() {
        let mut cache = LruCache::new(40);

        cache.put(0, 0);
        assert_eq!(cache.arena_len(), 17);
        assert_eq!(cache.bucket_count(), 32);

        for i in 1..16 {
            cache.put(i, i);
        }
        assert_eq!(cache.arena_len(), 17);

        cache.put(16, 16);
        assert_eq!(cache.arena_len(), 41);
        assert_eq!(cache.bucket_count(), 64);
        cache.check_invariants();

        for i in 0..=16 {
            assert_eq!(cache.peek(&i), Some(&i));
        }
    }

    #[test]
    fn test_growth_capped_by_capacity() {
        let mut cache = LruCache::new(3);
        for i in 0..10 {
            cache.put(i, i);
        }
        assert_eq!(cache.arena_len(), 4);
        assert_eq!(cache.len(), 3);
        assert_eq!(keys_of(&cache), vec![9, 8, 7]);
    }

    #[test]
    fn test_zero_capacity() {
        let mut cache = LruCache::new(0);
        cache.put(0, 0);
        assert!(!cache.contains(&0));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.put_with_evicted(1, 1), None);

        cache.set_capacity(1);
        cache.put(1, 1);
        assert!(cache.contains(&1));
        assert!(!cache.contains(&0));

        assert!(cache.remove(&1));
        assert!(!cache.contains(&1));
        assert!(!cache.contains(&0));

        cache.put(2, 2);
        assert_eq!(keys_of(&cache), vec![2]);
        cache.check_invariants();
    }

    #[test]
    fn test_get_moves_to_front() {
        let mut cache = LruCache::new(3);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);

        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(keys_of(&cache), vec![1, 3, 2]);
        assert_eq!(cache.get(&4), None);
        assert_eq!(keys_of(&cache), vec![1, 3, 2]);
    }

    #[test]
    fn test_peek_keeps_order() {
        let mut cache = LruCache::new(3);
        cache.put(1, 10);
        cache.put(2, 20);

        assert_eq!(cache.peek(&1), Some(&10));
        assert_eq!(keys_of(&cache), vec![2, 1]);

        *cache.peek_mut(&1).unwrap() = 11;
        assert_eq!(keys_of(&cache), vec![2, 1]);
        assert_eq!(cache.peek(&1), Some(&11));
    }

    #[test]
    fn test_get_mut() {
        let mut cache = LruCache::new(2);
        cache.put(1, 10);
        cache.put(2, 20);

        *cache.get_mut(&1).unwrap() += 5;
        assert_eq!(keys_of(&cache), vec![1, 2]);
        assert_eq!(cache.peek(&1), Some(&15));
    }

    #[test]
    fn test_update_and_refresh() {
        let mut cache = LruCache::new(3);
        cache.put(1, 10);
        cache.put(2, 20);

        assert!(!cache.update(&3, 30));
        assert!(!cache.refresh(&3, 30));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&3));

        assert!(cache.update(&1, 11));
        assert_eq!(keys_of(&cache), vec![1, 2]);
        assert_eq!(cache.peek(&1), Some(&11));

        assert!(cache.refresh(&2, 22));
        assert_eq!(keys_of(&cache), vec![2, 1]);
        assert_eq!(cache.peek(&2), Some(&22));
        cache.check_invariants();
    }

    #[test]
    fn test_put_overwrite() {
        let mut cache = LruCache::new(2);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(1, 11);

        assert_eq!(cache.len(), 2);
        assert_eq!(keys_of(&cache), vec![1, 2]);
        assert_eq!(cache.peek(&1), Some(&11));
    }

    #[test]
    fn test_put_with_evicted_events() {
        let mut cache = LruCache::new(2);
        assert_eq!(cache.put_with_evicted(10, 11), None);
        assert_eq!(cache.put_with_evicted(20, 22), None);

        let replaced = cache.put_with_evicted(10, 15).unwrap();
        assert!(!replaced.is_evicted());
        assert_eq!(replaced.into_inner(), (10, 11));

        let evicted = cache.put_with_evicted(30, 33).unwrap();
        assert!(evicted.is_evicted());
        assert_eq!(evicted, Displaced::Evicted { key: 20, value: 22 });
        cache.check_invariants();
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cache = LruCache::new(4);
        cache.put(1, 10);
        cache.put(2, 20);

        assert!(cache.remove(&1));
        assert!(!cache.remove(&1));
        assert!(!cache.remove(&9));
        assert_eq!(cache.len(), 1);
        assert_eq!(keys_of(&cache), vec![2]);
        cache.check_invariants();
    }

    #[test]
    fn test_pop_then_fresh_put() {
        let mut cache = LruCache::new(4);
        cache.put(1, 10);
        cache.put(2, 20);

        assert_eq!(cache.pop(&1), Some(10));
        assert_eq!(cache.pop(&1), None);
        assert!(!cache.contains(&1));

        assert_eq!(cache.put_with_evicted(1, 100), None);
        assert_eq!(cache.peek(&1), Some(&100));
        assert_eq!(cache.len(), 2);
        cache.check_invariants();
    }

    #[test]
    fn test_removed_slot_reused_before_eviction() {
        let mut cache = LruCache::new(3);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        cache.remove(&2);

        assert_eq!(cache.put_with_evicted(4, 4), None);
        assert_eq!(keys_of(&cache), vec![4, 3, 1]);
        assert_eq!(cache.arena_len(), 4);
    }

    #[test]
    fn test_lowering_capacity_keeps_entries() {
        let mut cache = LruCache::new(4);
        for i in 0..4 {
            cache.put(i, i);
        }
        cache.set_capacity(2);

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.arena_len(), 5);

        // Storage already exists, so inserts recycle the tail
        let evicted = cache.put_with_evicted(9, 9).unwrap();
        assert_eq!(evicted.into_inner(), (0, 0));
        assert_eq!(cache.len(), 4);
        cache.check_invariants();
    }

    #[test]
    fn test_raising_capacity_grows_on_demand() {
        let mut cache = LruCache::new(2);
        cache.put(10, 10);
        cache.put(20, 20);
        assert_eq!(cache.get(&10), Some(&10));
        cache.put(30, 30);
        assert!(cache.get(&20).is_none());

        cache.set_capacity(3);
        assert_eq!(cache.arena_len(), 3);
        assert_eq!(cache.put_with_evicted(40, 40), None);
        assert_eq!(cache.arena_len(), 4);
        assert_eq!(keys_of(&cache), vec![40, 30, 10]);

        let evicted = cache.put_with_evicted(50, 50).unwrap();
        assert_eq!(evicted, Displaced::Evicted { key: 10, value: 10 });
        cache.check_invariants();
    }

    #[test]
    fn test_clear_keeps_storage() {
        let mut cache = LruCache::new(8);
        for i in 0..8 {
            cache.put(i, i);
        }
        let arena_len = cache.arena_len();
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.arena_len(), arena_len);
        assert!(!cache.contains(&3));
        cache.check_invariants();

        cache.put(3, 30);
        assert_eq!(keys_of(&cache), vec![3]);
        cache.check_invariants();
    }

    #[test]
    fn test_capacity_limit() {
        assert!(LruCache::<u8, u8>::try_new(MAX_CAPACITY).is_ok());
        assert_eq!(
            LruCache::<u8, u8>::try_new(MAX_CAPACITY + 1).err(),
            Some(Error::CapacityTooLarge(MAX_CAPACITY + 1))
        );

        let mut cache: LruCache<u8, u8> = LruCache::new(1);
        assert!(cache.try_set_capacity(MAX_CAPACITY + 1).is_err());
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    #[should_panic]
    fn test_new_panics_past_limit() {
        let _ = LruCache::<u8, u8>::new(MAX_CAPACITY + 1);
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut cache = LruCache::new(4);
        cache.put(String::from("alpha"), 1);
        cache.put(String::from("beta"), 2);

        assert!(cache.contains("alpha"));
        assert_eq!(cache.get("beta"), Some(&2));
        assert_eq!(cache.pop("alpha"), Some(1));
        assert!(!cache.contains("alpha"));
    }

    #[test]
    fn test_payload_dropped_on_removal() {
        use std::rc::Rc;

        let tracked = Rc::new(());
        let mut cache = LruCache::new(1);

        cache.put(1, Rc::clone(&tracked));
        assert_eq!(Rc::strong_count(&tracked), 2);

        // Eviction
        cache.put(2, Rc::new(()));
        assert_eq!(Rc::strong_count(&tracked), 1);

        // Overwrite
        cache.put(2, Rc::clone(&tracked));
        cache.put(2, Rc::new(()));
        assert_eq!(Rc::strong_count(&tracked), 1);

        // Delete
        cache.put(2, Rc::clone(&tracked));
        cache.remove(&2);
        assert_eq!(Rc::strong_count(&tracked), 1);
    }

    #[test]
    fn test_debug_in_recency_order() {
        let mut cache = LruCache::new(3);
        cache.put(1, 'a');
        cache.put(2, 'b');

        assert_eq!(format!("{cache:?}"), "{2: 'b', 1: 'a'}");
    }

    #[test]
    fn test_extend() {
        let mut cache = LruCache::new(3);
        cache.extend((0..5).map(|i| (i, i * 10)));

        assert_eq!(keys_of(&cache), vec![4, 3, 2]);
        assert_eq!(cache.peek(&2), Some(&20));
    }

    #[test]
    fn test_large_churn() {
        let mut cache = LruCache::new(1000);
        for i in 0..5000 {
            cache.put(i, i);
            if i % 7 == 0 {
                cache.remove(&(i - 3));
            }
        }
        assert!(cache.len() <= 1000);
        cache.check_invariants();
        assert_eq!(cache.peek(&4999), Some(&4999));
    }
}
