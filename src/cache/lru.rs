//! Capacity-bounded image cache with timestamp LRU eviction
//!
//! Entries are keyed by sequence index. Recency comes from each entry's
//! `last_used` timestamp, so eviction is a linear scan for the oldest
//! entry. Capacities are small (a handful of screens), which keeps the
//! scan cheaper than maintaining an ordering structure on every touch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::entry::CacheEntry;
use super::error::CacheError;
use crate::index::Index;

/// Default number of decoded images kept in memory.
pub const DEFAULT_CAPACITY: usize = 10;

/// Counters describing cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found their index
    pub hits: u64,
    /// Lookups that did not
    pub misses: u64,
    /// Images stored (including overwrites)
    pub inserts: u64,
    /// Entries dropped to make room
    pub evictions: u64,
}

/// Image cache bounded by entry count.
pub struct ImageCache<I> {
    /// Cached entries (index -> entry)
    entries: HashMap<Index, CacheEntry<I>>,
    /// Maximum number of entries
    capacity: usize,
    /// Activity counters
    stats: CacheStats,
}

impl<I> ImageCache<I> {
    /// Create an empty cache holding at most `capacity` images.
    ///
    /// A capacity of zero is raised to one: the image being inserted must
    /// always fit.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, index: Index) -> bool {
        self.entries.contains_key(&index)
    }

    /// Cached entry for `index`, without marking it used.
    pub fn get(&self, index: Index) -> Option<&CacheEntry<I>> {
        self.entries.get(&index)
    }

    /// Image for `index`, marking it used and counting the hit or miss.
    pub fn lookup(&mut self, index: Index) -> Option<Arc<I>> {
        self.lookup_at(index, Instant::now())
    }

    pub fn lookup_at(&mut self, index: Index, at: Instant) -> Option<Arc<I>> {
        match self.entries.get_mut(&index) {
            Some(entry) => {
                entry.touch(at);
                self.stats.hits += 1;
                Some(Arc::clone(entry.image()))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Mark `index` as used now.
    pub fn touch(&mut self, index: Index) -> Result<(), CacheError> {
        self.touch_at(index, Instant::now())
    }

    pub fn touch_at(&mut self, index: Index, at: Instant) -> Result<(), CacheError> {
        let entry = self
            .entries
            .get_mut(&index)
            .ok_or(CacheError::NotFound { index })?;
        entry.touch(at);
        Ok(())
    }

    /// Store `image` at `index`, stamped with the current time.
    ///
    /// Returns the shared handle now owned by the cache.
    pub fn insert(&mut self, index: Index, image: I) -> Arc<I> {
        self.insert_at(index, image, Instant::now())
    }

    /// Store `image` at `index` with an explicit timestamp.
    ///
    /// A new index evicts least recently used entries until it fits.
    /// Replacing an existing index never evicts.
    pub fn insert_at(&mut self, index: Index, image: I, at: Instant) -> Arc<I> {
        if !self.entries.contains_key(&index) {
            while self.entries.len() >= self.capacity {
                if self.evict_lru().is_err() {
                    break;
                }
            }
        }

        let image = Arc::new(image);
        let mut entry = CacheEntry::new(Arc::clone(&image), at);
        if let Some(previous) = self.entries.get(&index) {
            entry.touch(previous.last_used());
        }
        self.entries.insert(index, entry);
        self.stats.inserts += 1;
        debug!(index, len = self.entries.len(), "cached image");
        image
    }

    /// Drop the least recently used entry and return its index.
    ///
    /// Equal timestamps evict the lowest index.
    pub fn evict_lru(&mut self) -> Result<Index, CacheError> {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(index, entry)| (entry.last_used(), **index))
            .map(|(index, _)| *index)
            .ok_or(CacheError::CacheEmpty)?;

        self.entries.remove(&oldest);
        self.stats.evictions += 1;
        debug!(index = oldest, "evicted least recently used image");
        Ok(oldest)
    }

    /// Remove an entry, returning it if present.
    pub fn remove(&mut self, index: Index) -> Option<CacheEntry<I>> {
        self.entries.remove(&index)
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Cached indices in ascending order.
    pub fn indices(&self) -> Vec<Index> {
        let mut indices: Vec<Index> = self.entries.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
