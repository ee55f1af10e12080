//! Image decode errors.

/// Errors an [`ImageStore`](super::ImageStore) can report for one identifier.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Image not found: {id}")]
    NotFound { id: String },

    #[error("Failed to read image {id}: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {id}: {reason}")]
    Format { id: String, reason: String },
}

impl DecodeError {
    /// The identifier that failed to decode.
    pub fn id(&self) -> &str {
        match self {
            DecodeError::NotFound { id } => id,
            DecodeError::Io { id, .. } => id,
            DecodeError::Format { id, .. } => id,
        }
    }
}
