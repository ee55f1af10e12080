//! One frame's worth of panels and their strip geometry.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::cache::CacheError;
use crate::index::Index;

/// An image slice placed on screen.
///
/// `src` is the column range taken from the image, `dst` the column range
/// it covers on screen. Both span the full height.
pub struct Panel<I> {
    pub index: Index,
    pub image: Arc<I>,
    pub src: Range<u32>,
    pub dst: Range<u32>,
}

impl<I> fmt::Debug for Panel<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("index", &self.index)
            .field("src", &self.src)
            .field("dst", &self.dst)
            .finish_non_exhaustive()
    }
}

/// What a side of the frame shows.
#[derive(Debug)]
pub enum PanelState<I> {
    /// Nothing to draw on this side at the current offset
    Hidden,
    Drawn(Panel<I>),
    /// The image could not be loaded this frame
    Missing { index: Index, error: CacheError },
}

impl<I> PanelState<I> {
    pub fn index(&self) -> Option<Index> {
        match self {
            PanelState::Hidden => None,
            PanelState::Drawn(panel) => Some(panel.index),
            PanelState::Missing { index, .. } => Some(*index),
        }
    }

    pub fn panel(&self) -> Option<&Panel<I>> {
        match self {
            PanelState::Drawn(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn is_drawn(&self) -> bool {
        matches!(self, PanelState::Drawn(_))
    }
}

/// Everything needed to draw one carousel frame.
///
/// The left panel shows the upcoming image entering from the left edge; the
/// right panel shows the current image. A divider line sits at `divider_x`.
#[derive(Debug)]
pub struct Frame<I> {
    pub width: u32,
    pub height: u32,
    pub first_visible: Index,
    pub divider_x: u32,
    pub left: PanelState<I>,
    pub right: PanelState<I>,
}

/// Source and destination columns of the left panel at `offset`.
pub fn left_geometry(offset: u32, width: u32) -> (Range<u32>, Range<u32>) {
    let offset = offset.min(width);
    (width - offset..width, 0..offset)
}

/// Source and destination columns of the right panel at `offset`.
pub fn right_geometry(offset: u32, width: u32) -> (Range<u32>, Range<u32>) {
    let offset = offset.min(width);
    (0..width - offset, offset..width)
}
