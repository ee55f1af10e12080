//! Configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY;
use crate::carousel::CarouselSettings;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
}

/// Image cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of decoded images kept in memory
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Carousel geometry and timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Pixels the divider moves per tick
    #[serde(default = "default_step")]
    pub step: u32,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// How often a paused carousel re-checks its state
    #[serde(default = "default_paused_interval_ms")]
    pub paused_interval_ms: u64,
}

fn default_width() -> u32 {
    1080
}

fn default_height() -> u32 {
    1920
}

fn default_step() -> u32 {
    10
}

fn default_tick_interval_ms() -> u64 {
    10
}

fn default_paused_interval_ms() -> u64 {
    200
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            step: default_step(),
            tick_interval_ms: default_tick_interval_ms(),
            paused_interval_ms: default_paused_interval_ms(),
        }
    }
}

impl Config {
    /// Validate all values.
    ///
    /// Returns an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if self.cache.capacity == 0 {
            return Err("cache.capacity must be > 0".to_string());
        }
        self.carousel.validate()
    }

    /// Carousel settings derived from this configuration.
    pub fn carousel_settings(&self) -> CarouselSettings {
        CarouselSettings {
            width: self.carousel.width,
            height: self.carousel.height,
            step: self.carousel.step,
            tick_interval: Duration::from_millis(self.carousel.tick_interval_ms),
            paused_interval: Duration::from_millis(self.carousel.paused_interval_ms),
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "carousel size {}x{} must be non-zero",
                self.width, self.height
            ));
        }
        if self.step == 0 {
            return Err("carousel.step must be > 0".to_string());
        }
        if self.step > self.width {
            return Err(format!(
                "carousel.step {} exceeds carousel.width {}",
                self.step, self.width
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err("carousel.tick_interval_ms must be > 0".to_string());
        }
        if self.paused_interval_ms == 0 {
            return Err("carousel.paused_interval_ms must be > 0".to_string());
        }
        Ok(())
    }
}
