//! Scroll position and play state.

use std::fmt;

use crate::index::{Index, IndexRing};

/// Whether the carousel is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayState::Stopped => "stopped",
            PlayState::Running => "running",
            PlayState::Paused => "paused",
        };
        f.write_str(label)
    }
}

/// Mutable carousel state, guarded by the carousel's lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub play: PlayState,
    /// Divider position in `[0, width)`
    pub current_x: u32,
    /// Index shown on the right of the divider
    pub first_visible: Index,
}

impl ScrollState {
    /// `Stopped`/`Paused`/`Running` -> `Running`.
    pub fn start(&mut self) -> bool {
        self.transition(PlayState::Running)
    }

    /// `Running` -> `Paused`.
    pub fn pause(&mut self) -> bool {
        self.play == PlayState::Running && self.transition(PlayState::Paused)
    }

    /// `Paused` -> `Running`.
    pub fn resume(&mut self) -> bool {
        self.play == PlayState::Paused && self.transition(PlayState::Running)
    }

    pub fn stop(&mut self) -> bool {
        self.transition(PlayState::Stopped)
    }

    fn transition(&mut self, to: PlayState) -> bool {
        let changed = self.play != to;
        self.play = to;
        changed
    }

    /// Move the divider by `step`, wrapping to the next image at `width`.
    ///
    /// Returns `true` when `first_visible` advanced.
    pub fn advance(&mut self, step: u32, width: u32, ring: IndexRing) -> bool {
        self.current_x = self.current_x.saturating_add(step);
        if self.current_x >= width {
            self.current_x = 0;
            self.first_visible = ring.next(self.first_visible);
            return true;
        }
        false
    }

    /// Back to the first image with the divider at the left edge.
    pub fn rewind(&mut self) {
        self.current_x = 0;
        self.first_visible = 0;
    }
}
