//! Circular index arithmetic over the image sequence.

/// Logical position in the image sequence.
pub type Index = usize;

/// The index universe `[0, len)` with wrapping neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRing {
    len: usize,
}

impl IndexRing {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, index: Index) -> bool {
        index < self.len
    }

    /// Following index, wrapping `len - 1` to `0`.
    ///
    /// An empty ring always answers `0`.
    pub fn next(&self, index: Index) -> Index {
        if index >= self.len.saturating_sub(1) {
            0
        } else {
            index + 1
        }
    }

    /// Preceding index, wrapping `0` to `len - 1`.
    pub fn prev(&self, index: Index) -> Index {
        if index == 0 || index > self.len {
            self.len.saturating_sub(1)
        } else {
            index - 1
        }
    }
}
