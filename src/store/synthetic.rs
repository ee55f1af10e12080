//! Generated solid-colour images.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::{Bitmap, DecodeError, ImageStore};

/// Produces a `width` x `height` bitmap filled with a colour derived from the id.
///
/// Ids of the form `#rrggbb` use that colour; anything else is hashed.
/// An empty id is treated as missing.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticStore {
    width: u32,
    height: u32,
}

impl SyntheticStore {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Identifiers `img-0` .. `img-{count-1}`.
    pub fn ids(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("img-{}", i)).collect()
    }

    /// Colour used for `id`.
    pub fn colour_of(id: &str) -> [u8; 4] {
        if let Some(hex) = id.strip_prefix('#') {
            if let Some(rgb) = parse_hex(hex) {
                return [rgb[0], rgb[1], rgb[2], 255];
            }
        }
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        let h = hasher.finish().to_le_bytes();
        [h[0], h[1], h[2], 255]
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

impl ImageStore for SyntheticStore {
    type Image = Bitmap;

    fn decode(&self, id: &str) -> Result<Bitmap, DecodeError> {
        if id.is_empty() {
            return Err(DecodeError::NotFound { id: String::new() });
        }
        let colour = Self::colour_of(id);
        let count = self.width as usize * self.height as usize;
        let pixels = colour
            .iter()
            .copied()
            .cycle()
            .take(count * Bitmap::CHANNELS)
            .collect();

        Ok(Bitmap {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}
