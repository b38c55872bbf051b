use madani_core::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Stored session rejected: {0}")]
    InvalidSnapshot(#[from] SessionError),
}

impl StoreError {
    /// Whether the stored file itself is unusable (as opposed to the disk).
    pub fn is_corrupt_data(&self) -> bool {
        !matches!(self, StoreError::Io(_))
    }
}
