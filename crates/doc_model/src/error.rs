//! Error types for the document model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Line {0} out of range")]
    LineOutOfRange(usize),

    #[error("Column {column} out of range on line {line}")]
    ColumnOutOfRange { line: usize, column: usize },
}

pub type Result<T> = std::result::Result<T, DocModelError>;
