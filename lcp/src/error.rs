//! Top-level error type: wraps the lower crates' errors so callers only ever
//! match one enum, plus the failure modes specific to the LPS file format.

use thiserror::Error;

/// Errors arising from the `lcp` crate's public operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the core representation / alphabet layer.
    #[error(transparent)]
    Core(#[from] lcp_core::Error),

    /// An error from the label interning layer.
    #[error(transparent)]
    Hash(#[from] lcp_hash::Error),

    /// A short read or write on an LPS file, not already covered by
    /// [`Error::Core`].
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An LPS file's `level`/`size` header is malformed.
    #[error("corrupted LPS file: {message}")]
    CorruptedFile {
        /// Description of what was malformed.
        message: String,
    },
}

/// Result type alias for `lcp` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a corrupted-file error.
    pub fn corrupted_file(message: impl Into<String>) -> Self {
        Self::CorruptedFile {
            message: message.into(),
        }
    }
}
