//! Background decode worker
//!
//! One thread, fed by the single-slot [`LoadPhase`]. The loop is: take the
//! in-flight index, decode it outside every lock, insert the result, then
//! advance the phase (chaining to a queued index or going idle). Failures
//! are logged and counted, never propagated.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};

use tracing::{debug, warn};

use super::catalog::Catalog;
use super::state::SlotState;
use super::stats::Counters;
use crate::cache::SharedCache;
use crate::index::Index;
use crate::store::{DecodeError, ImageStore};

/// State shared between the [`Loader`](super::Loader) handle and its worker.
pub(super) struct Shared<S: ImageStore> {
    pub store: S,
    pub cache: SharedCache<S::Image>,
    pub catalog: RwLock<Catalog>,
    pub slot: Mutex<SlotState>,
    /// Signalled on every phase change
    pub wake: Condvar,
    pub counters: Counters,
}

impl<S: ImageStore> Shared<S> {
    pub fn new(store: S, cache: SharedCache<S::Image>) -> Self {
        Self {
            store,
            cache,
            catalog: RwLock::new(Catalog::default()),
            slot: Mutex::new(SlotState::default()),
            wake: Condvar::new(),
            counters: Counters::default(),
        }
    }

    pub fn lock_slot(&self) -> MutexGuard<'_, SlotState> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn read_catalog(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decode `id`, turning a panicking store into a decode error.
    pub fn decode(&self, id: &str) -> Result<S::Image, DecodeError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.store.decode(id))).unwrap_or_else(|_| {
            Err(DecodeError::Format {
                id: id.to_string(),
                reason: "decoder panicked".to_string(),
            })
        })
    }

    /// Block until there is an in-flight index to decode.
    ///
    /// Returns `None` once shutdown has been requested.
    fn next_job(&self) -> Option<Index> {
        let mut slot = self.lock_slot();
        loop {
            if slot.shutdown {
                return None;
            }
            if let Some(index) = slot.phase.in_flight() {
                return Some(index);
            }
            slot = self.wake.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn finish_job(&self) {
        let mut slot = self.lock_slot();
        slot.phase = slot.phase.complete();
        debug!(phase = ?slot.phase, "background load finished");
        self.wake.notify_all();
    }

    fn process(&self, index: Index) {
        let (id, generation) = {
            let catalog = self.read_catalog();
            match catalog.resolve(index) {
                Ok(id) => (id.to_string(), catalog.generation()),
                Err(e) => {
                    debug!(index, error = %e, "dropping background load");
                    Counters::bump(&self.counters.discarded);
                    return;
                }
            }
        };

        if self.cache.contains(index) {
            debug!(index, "already cached, skipping background load");
            Counters::bump(&self.counters.skipped);
            return;
        }

        Counters::bump(&self.counters.async_decodes);
        debug!(index, id = %id, "background load started");

        match self.decode(&id) {
            Ok(image) => {
                // Catalog stays read-locked across the insert: a sequence
                // swap clears the cache under the write lock.
                let catalog = self.read_catalog();
                if catalog.generation() == generation {
                    self.cache.insert(index, image);
                } else {
                    debug!(index, "sequence replaced during load, discarding result");
                    Counters::bump(&self.counters.discarded);
                }
            }
            Err(e) => {
                warn!(index, error = %e, "background load failed");
                Counters::bump(&self.counters.async_failures);
            }
        }
    }
}

/// Worker thread body. Runs until shutdown is requested.
pub(super) fn run<S: ImageStore>(shared: Arc<Shared<S>>) {
    debug!("loader worker started");
    while let Some(index) = shared.next_job() {
        shared.process(index);
        shared.finish_job();
    }
    debug!("loader worker stopped");
}
