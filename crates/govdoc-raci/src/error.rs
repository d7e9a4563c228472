//! Error types for RACI workbook generation.

use thiserror::Error;

/// Result type for RACI operations
pub type Result<T> = std::result::Result<T, RaciError>;

/// Errors that can occur while building a RACI workbook
#[derive(Debug, Error)]
pub enum RaciError {
    /// Reading or parsing the markdown source failed
    #[error(transparent)]
    Source(#[from] govdoc_core::CoreError),

    /// Building or writing the workbook failed
    #[error(transparent)]
    Workbook(#[from] govdoc_ooxml::OoxmlError),

    /// A reference table targets a sheet the workbook does not have
    #[error("Reference sheet not found: {0}")]
    UnknownReferenceSheet(String),
}
