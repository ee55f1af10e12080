//! Carousel control errors.

use crate::cache::CacheError;

#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    #[error("Cannot show an empty image sequence")]
    EmptyCatalog,

    #[error(transparent)]
    Cache(#[from] CacheError),
}
