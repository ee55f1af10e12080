//! Image loading: synchronous inline decodes and a single-flight
//! background prefetcher.
//!
//! # Design
//!
//! - `load_sync` decodes on the caller's thread. It is reserved for the image
//!   a frame needs right now.
//! - `load_async` hands an index to one background worker. While a decode is
//!   running, further requests overwrite a single pending slot, so only the
//!   most recent one runs next and fast scrolling never builds a queue.
//! - The worker is spawned on the first asynchronous request and joined when
//!   the loader is dropped.
//!
//! # Example
//!
//! ```ignore
//! use scanswitch::{Loader, SharedCache, SyntheticStore};
//!
//! let loader = Loader::new(SyntheticStore::new(64, 64), SharedCache::new(10));
//! loader.replace_catalog(SyntheticStore::ids(4));
//! let first = loader.load_sync(0)?;
//! loader.load_async(1);
//! ```

mod catalog;
mod state;
mod stats;
mod worker;

pub use catalog::Catalog;
pub use state::LoadPhase;
pub use stats::LoaderStats;

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{CacheError, SharedCache};
use crate::index::{Index, IndexRing};
use crate::store::ImageStore;
use stats::Counters;
use worker::Shared;

/// Name given to the background decode thread.
pub const WORKER_THREAD_NAME: &str = "scanswitch-loader";

/// Loads images into a [`SharedCache`] from an [`ImageStore`].
pub struct Loader<S: ImageStore> {
    shared: Arc<Shared<S>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<S: ImageStore> Loader<S> {
    pub fn new(store: S, cache: SharedCache<S::Image>) -> Self {
        Self {
            shared: Arc::new(Shared::new(store, cache)),
            worker: Mutex::new(None),
        }
    }

    pub fn cache(&self) -> &SharedCache<S::Image> {
        &self.shared.cache
    }

    pub fn store(&self) -> &S {
        &self.shared.store
    }

    /// Replace the image sequence and drop every cached image.
    ///
    /// Background results decoded for the previous sequence are discarded.
    /// Returns the new catalog generation.
    pub fn replace_catalog(&self, ids: Vec<String>) -> u64 {
        let mut catalog = self
            .shared
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let generation = catalog.replace(ids);
        self.shared.cache.clear();
        info!(len = catalog.len(), generation, "image sequence replaced");
        generation
    }

    /// Snapshot of the current sequence.
    pub fn catalog(&self) -> Catalog {
        self.shared.read_catalog().clone()
    }

    pub fn ring(&self) -> IndexRing {
        self.shared.read_catalog().ring()
    }

    /// Return the image at `index`, decoding it on this thread when missing.
    ///
    /// A decode failure leaves the cache untouched; the next call retries.
    pub fn load_sync(&self, index: Index) -> Result<Arc<S::Image>, CacheError> {
        let (id, generation) = {
            let catalog = self.shared.read_catalog();
            (catalog.resolve(index)?.to_string(), catalog.generation())
        };

        let cached = self.shared.cache.with(|cache| {
            let entry = cache.get(index).map(|e| Arc::clone(e.image()));
            if entry.is_some() {
                let _ = cache.touch(index);
            }
            entry
        });
        if let Some(image) = cached {
            return Ok(image);
        }

        debug!(index, id = %id, "loading image synchronously");
        match self.shared.decode(&id) {
            Ok(image) => {
                Counters::bump(&self.shared.counters.sync_loads);
                let catalog = self.shared.read_catalog();
                if catalog.generation() == generation {
                    Ok(self.shared.cache.insert(index, image))
                } else {
                    Ok(Arc::new(image))
                }
            }
            Err(source) => {
                Counters::bump(&self.shared.counters.sync_failures);
                Err(CacheError::DecodeFailed { index, source })
            }
        }
    }

    /// Schedule `index` for background decoding without blocking.
    ///
    /// While a decode is running, only the most recent request is kept.
    pub fn load_async(&self, index: Index) {
        Counters::bump(&self.shared.counters.async_requests);

        let dispatch = {
            let mut slot = self.shared.lock_slot();
            if slot.shutdown {
                return;
            }
            let was_idle = slot.phase.is_idle();
            let (phase, dropped) = slot.phase.request(index);
            slot.phase = phase;
            if let Some(dropped) = dropped {
                debug!(dropped, index, "coalesced background load");
                Counters::bump(&self.shared.counters.coalesced);
            }
            was_idle
        };

        if dispatch {
            debug!(index, "dispatching background load");
            if self.ensure_worker() {
                self.shared.wake.notify_all();
            }
        }
    }

    /// Spawn the worker thread if it is not running yet.
    ///
    /// Returns `false` when the thread could not be started; the request is
    /// dropped and the loader goes back to idle.
    fn ensure_worker(&self) -> bool {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if worker.is_some() {
            return true;
        }

        let shared = Arc::clone(&self.shared);
        match thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker::run(shared))
        {
            Ok(handle) => {
                *worker = Some(handle);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to start loader worker");
                self.shared.lock_slot().phase = LoadPhase::Idle;
                self.shared.wake.notify_all();
                false
            }
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.shared.lock_slot().phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase().is_idle()
    }

    /// Wait until no background decode is running or queued.
    ///
    /// Returns `true` if the loader went idle within `timeout`.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let slot = self.shared.lock_slot();
        let (slot, _) = self
            .shared
            .wake
            .wait_timeout_while(slot, timeout, |s| !s.phase.is_idle())
            .unwrap_or_else(PoisonError::into_inner);
        slot.phase.is_idle()
    }

    pub fn stats(&self) -> LoaderStats {
        self.shared.counters.snapshot()
    }

    /// Whether the background thread has been started.
    pub fn has_worker(&self) -> bool {
        self.worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<S: ImageStore> Drop for Loader<S> {
    fn drop(&mut self) {
        self.shared.lock_slot().shutdown = true;
        self.shared.wake.notify_all();

        let handle = self
            .worker
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("loader worker panicked");
            }
        }
    }
}
