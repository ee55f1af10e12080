//! Image sources for the carousel.
//!
//! An [`ImageStore`] turns an opaque identifier into a decoded image. The
//! cache and loader never look inside the image; they only own it and hand
//! shared handles to frames.
//!
//! Two stores ship with the crate:
//! - [`FileStore`] reads files below a root directory and decodes them to RGBA
//! - [`SyntheticStore`] derives a solid-colour bitmap from the identifier

mod error;
mod file;
mod synthetic;

pub use error::DecodeError;
pub use file::FileStore;
pub use synthetic::SyntheticStore;

/// A decoded RGBA8 raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Bytes per pixel in `pixels`.
    pub const CHANNELS: usize = 4;

    /// Size of the pixel buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    /// RGBA value at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        let px = self.pixels.get(offset..offset + Self::CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decodes images by identifier.
///
/// Implementations are called from both the frame thread (synchronous
/// loads) and the loader worker, so they must be shareable.
pub trait ImageStore: Send + Sync + 'static {
    /// The decoded image type held by the cache.
    type Image: Send + Sync + 'static;

    /// Decode the image named by `id`.
    fn decode(&self, id: &str) -> Result<Self::Image, DecodeError>;
}
