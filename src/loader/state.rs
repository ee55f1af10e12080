//! Single-flight loader state machine.

use crate::index::Index;

/// What the background worker is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing scheduled
    Idle,
    /// One decode dispatched or running
    InFlight(Index),
    /// A decode is running and another index is queued behind it
    Pending { in_flight: Index, next: Index },
}

impl LoadPhase {
    /// Index the worker should be decoding, if any.
    pub fn in_flight(&self) -> Option<Index> {
        match *self {
            LoadPhase::Idle => None,
            LoadPhase::InFlight(index) => Some(index),
            LoadPhase::Pending { in_flight, .. } => Some(in_flight),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, LoadPhase::Idle)
    }

    /// Apply an asynchronous request for `index`.
    ///
    /// Returns the new phase and, when a queued request was replaced, the
    /// index that will now never be decoded.
    pub fn request(self, index: Index) -> (LoadPhase, Option<Index>) {
        match self {
            LoadPhase::Idle => (LoadPhase::InFlight(index), None),
            LoadPhase::InFlight(current) if current == index => (self, None),
            LoadPhase::InFlight(current) => (
                LoadPhase::Pending {
                    in_flight: current,
                    next: index,
                },
                None,
            ),
            LoadPhase::Pending { next, .. } if next == index => (self, None),
            LoadPhase::Pending { in_flight, next } if in_flight == index => {
                (LoadPhase::InFlight(in_flight), Some(next))
            }
            LoadPhase::Pending { in_flight, next } => (
                LoadPhase::Pending {
                    in_flight,
                    next: index,
                },
                Some(next),
            ),
        }
    }

    /// Phase after the running decode completes (successfully or not).
    pub fn complete(self) -> LoadPhase {
        match self {
            LoadPhase::Pending { next, .. } => LoadPhase::InFlight(next),
            _ => LoadPhase::Idle,
        }
    }
}

/// Loader state guarded by one mutex.
#[derive(Debug)]
pub(super) struct SlotState {
    pub phase: LoadPhase,
    pub shutdown: bool,
}

impl Default for SlotState {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Idle,
            shutdown: false,
        }
    }
}
