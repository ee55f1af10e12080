//! Horizontally scrolling image carousel controller
//!
//! Owns the scroll state machine and decides, each frame, which two images
//! are visible and what the cache must do for them:
//! - the image drawn this frame is loaded synchronously when missing
//! - a cached image is touched to keep it recent
//! - the image beyond each drawn panel is prefetched in the background
//!
//! Rendering is left to the caller; [`Carousel::frame`] returns the panels
//! and their strip geometry.

mod driver;
mod error;
mod frame;
mod state;

pub use driver::{Driver, FrameSink};
pub use error::CarouselError;
pub use frame::{left_geometry, right_geometry, Frame, Panel, PanelState};
pub use state::{PlayState, ScrollState};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::cache::SharedCache;
use crate::index::Index;
use crate::loader::{Loader, LoaderStats};
use crate::store::ImageStore;

/// Geometry and timing of the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSettings {
    pub width: u32,
    pub height: u32,
    /// Pixels the divider moves per tick
    pub step: u32,
    /// Delay between ticks while running
    pub tick_interval: Duration,
    /// Delay between re-checks while paused or stopped
    pub paused_interval: Duration,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            step: 10,
            tick_interval: Duration::from_millis(10),
            paused_interval: Duration::from_millis(200),
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The divider moved; a frame should be drawn. Tick again after the delay.
    Advanced(Duration),
    /// Paused; check again after the delay.
    Waiting(Duration),
    /// Not started, or stopped.
    Stopped,
}

/// Carousel over an [`ImageStore`], with its own cache and loader.
pub struct Carousel<S: ImageStore> {
    loader: Loader<S>,
    scroll: Mutex<ScrollState>,
    settings: CarouselSettings,
}

impl<S: ImageStore> Carousel<S> {
    pub fn new(store: S, capacity: usize, settings: CarouselSettings) -> Self {
        Self {
            loader: Loader::new(store, SharedCache::new(capacity)),
            scroll: Mutex::new(ScrollState::default()),
            settings,
        }
    }

    fn lock_scroll(&self) -> MutexGuard<'_, ScrollState> {
        self.scroll.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    pub fn loader(&self) -> &Loader<S> {
        &self.loader
    }

    pub fn cache(&self) -> &SharedCache<S::Image> {
        self.loader.cache()
    }

    pub fn loader_stats(&self) -> LoaderStats {
        self.loader.stats()
    }

    /// Show a new image sequence, starting from its first image.
    ///
    /// Clears the cache and loads image 0 before returning.
    pub fn set_data(&self, ids: Vec<String>) -> Result<(), CarouselError> {
        if ids.is_empty() {
            return Err(CarouselError::EmptyCatalog);
        }
        self.loader.replace_catalog(ids);
        self.lock_scroll().rewind();
        self.loader.load_sync(0)?;
        Ok(())
    }

    pub fn start(&self) -> bool {
        let changed = self.lock_scroll().start();
        if changed {
            info!("carousel started");
        }
        changed
    }

    pub fn pause(&self) -> bool {
        let changed = self.lock_scroll().pause();
        if changed {
            info!("carousel paused");
        }
        changed
    }

    pub fn resume(&self) -> bool {
        let changed = self.lock_scroll().resume();
        if changed {
            info!("carousel resumed");
        }
        changed
    }

    pub fn stop(&self) -> bool {
        let changed = self.lock_scroll().stop();
        if changed {
            info!("carousel stopped");
        }
        changed
    }

    pub fn state(&self) -> PlayState {
        self.lock_scroll().play
    }

    /// Current `(first_visible, divider offset)`.
    pub fn position(&self) -> (Index, u32) {
        let scroll = self.lock_scroll();
        (scroll.first_visible, scroll.current_x)
    }

    /// Advance the scroll position by one step when running.
    pub fn tick(&self) -> TickOutcome {
        let ring = self.loader.ring();
        let mut scroll = self.lock_scroll();
        match scroll.play {
            PlayState::Running => {
                if scroll.advance(self.settings.step, self.settings.width, ring) {
                    debug!(first_visible = scroll.first_visible, "advanced to next image");
                }
                trace!(current_x = scroll.current_x, "tick");
                TickOutcome::Advanced(self.settings.tick_interval)
            }
            PlayState::Paused => TickOutcome::Waiting(self.settings.paused_interval),
            PlayState::Stopped => TickOutcome::Stopped,
        }
    }

    /// Prepare the visible panels for drawing.
    ///
    /// Returns `None` unless running with a non-empty sequence. Missing
    /// images for this frame are decoded on the calling thread; their
    /// neighbours are queued for background loading.
    pub fn frame(&self) -> Option<Frame<S::Image>> {
        let scroll = *self.lock_scroll();
        if scroll.play != PlayState::Running {
            return None;
        }
        let ring = self.loader.ring();
        if ring.is_empty() {
            return None;
        }

        let width = self.settings.width;
        let offset = scroll.current_x;

        let left = if offset == 0 {
            PanelState::Hidden
        } else {
            let index = ring.next(scroll.first_visible);
            let (src, dst) = left_geometry(offset, width);
            let state = self.panel(index, src, dst);
            self.prefetch(ring.next(index));
            state
        };

        let right = if offset >= width {
            PanelState::Hidden
        } else {
            let index = scroll.first_visible;
            let (src, dst) = right_geometry(offset, width);
            let state = self.panel(index, src, dst);
            self.prefetch(ring.next(index));
            state
        };

        Some(Frame {
            width,
            height: self.settings.height,
            first_visible: scroll.first_visible,
            divider_x: offset,
            left,
            right,
        })
    }

    fn panel(
        &self,
        index: Index,
        src: std::ops::Range<u32>,
        dst: std::ops::Range<u32>,
    ) -> PanelState<S::Image> {
        let image = match self.cache().lookup(index) {
            Some(image) => Ok(image),
            None => self.loader.load_sync(index),
        };
        match image {
            Ok(image) => PanelState::Drawn(Panel {
                index,
                image,
                src,
                dst,
            }),
            Err(error) => {
                warn!(index, error = %error, "image unavailable for frame");
                PanelState::Missing { index, error }
            }
        }
    }

    fn prefetch(&self, index: Index) {
        if !self.cache().contains(index) {
            self.loader.load_async(index);
        }
    }
}
