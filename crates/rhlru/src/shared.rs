//! Lock-wrapped cache handle for use across threads
//!
//! `LruCache` does no locking of its own. This wraps one in an
//! `Arc<RwLock<_>>`; every call that touches recency takes the write lock.

use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use ahash::RandomState;
use equivalent::Equivalent;
use parking_lot::RwLock;

use crate::cache::{Displaced, LruCache};

/// Cloneable, thread-safe handle to a shared [`LruCache`]
pub struct SharedLruCache<K, V, S = RandomState> {
    inner: Arc<RwLock<LruCache<K, V, S>>>,
}

impl<K, V, S> Clone for SharedLruCache<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedLruCache<K, V> {
    /// Create a shared cache with the given capacity
    ///
    /// # Panics
    /// If `capacity` exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LruCache::new(capacity))
    }
}

impl<K, V, S> SharedLruCache<K, V, S> {
    /// Wrap an existing cache
    pub fn from_cache(cache: LruCache<K, V, S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Growth ceiling
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Change the growth ceiling
    pub fn set_capacity(&self, capacity: usize) {
        self.inner.write().set_capacity(capacity);
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Run `f` with shared access to the cache
    pub fn with<R>(&self, f: impl FnOnce(&LruCache<K, V, S>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the cache
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut LruCache<K, V, S>) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl<K, V, S> SharedLruCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Check if `key` is cached
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.inner.read().contains(key)
    }

    /// Get a copy of the value and mark it most recently used
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    /// Get a copy of the value without changing recency
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
        V: Clone,
    {
        self.inner.read().peek(key).cloned()
    }

    /// See [`LruCache::update`]
    pub fn update<Q>(&self, key: &Q, value: V) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.inner.write().update(key, value)
    }

    /// See [`LruCache::refresh`]
    pub fn refresh<Q>(&self, key: &Q, value: V) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.inner.write().refresh(key, value)
    }

    /// See [`LruCache::put`]
    pub fn put(&self, key: K, value: V) {
        let displaced = self.inner.write().put_with_evicted(key, value);
        // Drop outside the lock
        drop(displaced);
    }

    /// See [`LruCache::put_with_evicted`]
    pub fn put_with_evicted(&self, key: K, value: V) -> Option<Displaced<K, V>> {
        self.inner.write().put_with_evicted(key, value)
    }

    /// See [`LruCache::remove`]
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.pop(key).is_some()
    }

    /// See [`LruCache::pop`]
    pub fn pop<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.inner.write().pop(key)
    }
}
