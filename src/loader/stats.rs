//! Loader activity counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of loader activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderStats {
    /// Synchronous decodes that succeeded
    pub sync_loads: u64,
    /// Synchronous decodes that failed
    pub sync_failures: u64,
    /// Calls to `load_async`
    pub async_requests: u64,
    /// Background decodes started
    pub async_decodes: u64,
    /// Queued requests replaced before they ran
    pub coalesced: u64,
    /// Background decodes that failed
    pub async_failures: u64,
    /// Background jobs skipped because the image was already cached
    pub skipped: u64,
    /// Background results dropped because the sequence changed
    pub discarded: u64,
}

/// Thread-safe counters behind [`LoaderStats`].
#[derive(Debug, Default)]
pub(super) struct Counters {
    pub sync_loads: AtomicU64,
    pub sync_failures: AtomicU64,
    pub async_requests: AtomicU64,
    pub async_decodes: AtomicU64,
    pub coalesced: AtomicU64,
    pub async_failures: AtomicU64,
    pub skipped: AtomicU64,
    pub discarded: AtomicU64,
}

impl Counters {
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> LoaderStats {
        let load = |c: &AtomicU64| c.load(Ordering::SeqCst);
        LoaderStats {
            sync_loads: load(&self.sync_loads),
            sync_failures: load(&self.sync_failures),
            async_requests: load(&self.async_requests),
            async_decodes: load(&self.async_decodes),
            coalesced: load(&self.coalesced),
            async_failures: load(&self.async_failures),
            skipped: load(&self.skipped),
            discarded: load(&self.discarded),
        }
    }
}
