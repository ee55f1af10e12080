//! Bounded image cache with LRU eviction
//!
//! [`ImageCache`] is the plain single-owner map; [`SharedCache`] puts it
//! behind one mutex for use from the frame thread and the loader worker.

mod entry;
mod error;
mod lru;
mod shared;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use lru::{CacheStats, ImageCache, DEFAULT_CAPACITY};
pub use shared::SharedCache;
