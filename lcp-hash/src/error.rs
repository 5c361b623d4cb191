//! Error types for the label interning layer.

use thiserror::Error;

/// Errors arising from interning-table operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Growing the string map or the tuple bucket table failed.
    #[error("interner allocation failure: {message}")]
    AllocationFailure {
        /// Description of what allocation failed.
        message: String,
    },
}

/// Result type alias for `lcp-hash` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an allocation failure error.
    pub fn allocation_failure(message: impl Into<String>) -> Self {
        Self::AllocationFailure {
            message: message.into(),
        }
    }
}
