//! scanswitch - image carousel engine
//!
//! A bounded, time-ordered image cache with single-flight background
//! prefetching, and the carousel controller that drives it.

pub mod cache;
pub mod carousel;
pub mod config;
pub mod index;
pub mod loader;
pub mod store;

pub use cache::{CacheEntry, CacheError, CacheStats, ImageCache, SharedCache};
pub use carousel::{
    Carousel, CarouselError, CarouselSettings, Driver, Frame, FrameSink, Panel, PanelState,
    PlayState, TickOutcome,
};
pub use config::Config;
pub use index::{Index, IndexRing};
pub use loader::{LoadPhase, Loader, LoaderStats};
pub use store::{Bitmap, DecodeError, FileStore, ImageStore, SyntheticStore};
