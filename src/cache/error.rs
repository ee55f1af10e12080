//! Cache and load errors.

use crate::index::Index;
use crate::store::DecodeError;

/// Errors from cache operations and the synchronous load path.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to load image #{index}: {source}")]
    DecodeFailed {
        index: Index,
        #[source]
        source: DecodeError,
    },

    #[error("Image #{index} is not cached")]
    NotFound { index: Index },

    #[error("Cache is empty, nothing to evict")]
    CacheEmpty,

    #[error("Image #{index} is outside the sequence (length {len})")]
    OutOfRange { index: Index, len: usize },
}
