//! Error types for ratelog.

use thiserror::Error;

/// Result type alias for ratelog operations.
pub type Result<T> = std::result::Result<T, RatelogError>;

/// Errors that can occur while ingesting a rates document.
///
/// Every variant is fatal only to the document (or single currency merge)
/// it concerns; batch processing catches these at the per-document boundary.
#[derive(Error, Debug)]
pub enum RatelogError {
    /// The source document could not be decoded into text pages.
    #[error("Document error: {0}")]
    Document(String),

    /// The Date/Time marker lines were missing or unparseable.
    #[error("Timestamp error: {0}")]
    Timestamp(String),

    /// The rate table header was found but no data line matched.
    #[error("No rate rows matched in document")]
    NoRateRows,

    /// An existing dataset file is malformed or incompatible.
    #[error("Dataset error for {currency}: {message}")]
    Dataset {
        /// The currency whose dataset failed.
        currency: String,
        /// What went wrong.
        message: String,
    },

    /// Document retrieval failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
