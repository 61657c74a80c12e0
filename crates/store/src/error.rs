//! Error types for structured export

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Package write failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
