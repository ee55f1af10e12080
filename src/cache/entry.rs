//! Cache entry: a decoded image plus its last access time.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// One cached image.
///
/// The cache owns the entry; callers receive clones whose `image` handle
/// shares the bitmap for as long as they draw it.
pub struct CacheEntry<I> {
    image: Arc<I>,
    last_used: Instant,
}

impl<I> CacheEntry<I> {
    pub fn new(image: Arc<I>, last_used: Instant) -> Self {
        Self { image, last_used }
    }

    pub fn image(&self) -> &Arc<I> {
        &self.image
    }

    pub fn last_used(&self) -> Instant {
        self.last_used
    }

    /// Record a use at `at`. Timestamps never move backwards.
    pub(crate) fn touch(&mut self, at: Instant) {
        if at > self.last_used {
            self.last_used = at;
        }
    }
}

impl<I> Clone for CacheEntry<I> {
    fn clone(&self) -> Self {
        Self {
            image: Arc::clone(&self.image),
            last_used: self.last_used,
        }
    }
}

impl<I> fmt::Debug for CacheEntry<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("last_used", &self.last_used)
            .finish_non_exhaustive()
    }
}
