//! Thread-safe handle to an [`ImageCache`].
//!
//! Every method takes the lock exactly once, so each operation is atomic
//! with respect to the frame thread and the loader worker.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use super::entry::CacheEntry;
use super::error::CacheError;
use super::lru::{CacheStats, ImageCache};
use crate::index::Index;

/// Cloneable, lock-guarded image cache.
pub struct SharedCache<I> {
    inner: Arc<Mutex<ImageCache<I>>>,
}

impl<I> Clone for SharedCache<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I> SharedCache<I> {
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(ImageCache::new(capacity))
    }

    pub fn from_cache(cache: ImageCache<I>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // No operation panics while holding the lock, so a poisoned guard still
    // protects a consistent map.
    fn lock(&self) -> MutexGuard<'_, ImageCache<I>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the cache.
    pub fn with<R>(&self, f: impl FnOnce(&mut ImageCache<I>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn get(&self, index: Index) -> Option<CacheEntry<I>> {
        self.lock().get(index).cloned()
    }

    pub fn lookup(&self, index: Index) -> Option<Arc<I>> {
        self.lock().lookup(index)
    }

    pub fn contains(&self, index: Index) -> bool {
        self.lock().contains(index)
    }

    pub fn touch(&self, index: Index) -> Result<(), CacheError> {
        self.lock().touch(index)
    }

    pub fn touch_at(&self, index: Index, at: Instant) -> Result<(), CacheError> {
        self.lock().touch_at(index, at)
    }

    pub fn insert(&self, index: Index, image: I) -> Arc<I> {
        self.lock().insert(index, image)
    }

    pub fn insert_at(&self, index: Index, image: I, at: Instant) -> Arc<I> {
        self.lock().insert_at(index, image, at)
    }

    pub fn evict_lru(&self) -> Result<Index, CacheError> {
        self.lock().evict_lru()
    }

    pub fn remove(&self, index: Index) -> Option<CacheEntry<I>> {
        self.lock().remove(index)
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn indices(&self) -> Vec<Index> {
        self.lock().indices()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}
