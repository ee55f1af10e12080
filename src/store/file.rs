//! Directory-backed image store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::{Bitmap, DecodeError, ImageStore};

/// File extensions picked up by [`FileStore::scan`].
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Reads image files relative to a root directory.
///
/// Identifiers are file names (or relative paths) below `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the image files directly inside the root, sorted by name.
    ///
    /// The returned names are usable as identifiers for [`ImageStore::decode`].
    pub fn scan(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read image directory: {:?}", self.root))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() || !has_image_extension(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                ids.push(name.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

impl ImageStore for FileStore {
    type Image = Bitmap;

    fn decode(&self, id: &str) -> Result<Bitmap, DecodeError> {
        let path = self.root.join(id);
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DecodeError::NotFound { id: id.to_string() },
            _ => DecodeError::Io {
                id: id.to_string(),
                source: e,
            },
        })?;

        let img = image::load_from_memory(&bytes).map_err(|e| DecodeError::Format {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        debug!(id, width, height, "decoded image file");

        Ok(Bitmap {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}
