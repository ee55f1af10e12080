//! The current image sequence and its generation.

use crate::cache::CacheError;
use crate::index::{Index, IndexRing};

/// Identifiers for the carousel, in display order.
///
/// `generation` changes every time the sequence is replaced so that results
/// decoded against an older sequence can be recognised and dropped.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ids: Vec<String>,
    generation: u64,
}

impl Catalog {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ring(&self) -> IndexRing {
        IndexRing::new(self.ids.len())
    }

    /// Swap in a new sequence, returning the new generation.
    pub fn replace(&mut self, ids: Vec<String>) -> u64 {
        self.ids = ids;
        self.generation += 1;
        self.generation
    }

    /// Identifier at `index`.
    pub fn resolve(&self, index: Index) -> Result<&str, CacheError> {
        self.ids
            .get(index)
            .map(String::as_str)
            .ok_or(CacheError::OutOfRange {
                index,
                len: self.ids.len(),
            })
    }
}
