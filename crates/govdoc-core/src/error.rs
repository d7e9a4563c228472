//! Error types for the core library.

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while reading markdown sources
#[derive(Debug, Error)]
pub enum CoreError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error, including invalid UTF-8 content
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
