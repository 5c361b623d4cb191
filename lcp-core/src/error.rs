//! Error types for alphabet encoding and core representation.

use std::io;
use thiserror::Error;

/// Errors arising from alphabet initialization and core (de)serialization.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error reading an alphabet or core file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Alphabet initialization was given a negative or otherwise invalid code.
    #[error("invalid alphabet argument: {message}")]
    InvalidAlphabetArgument {
        /// Description of what made the argument invalid.
        message: String,
    },

    /// An alphabet file line could not be parsed.
    #[error("malformed alphabet file at line {line}: {message}")]
    MalformedAlphabetFile {
        /// 1-based line number.
        line: usize,
        /// Description of the parse failure.
        message: String,
    },

    /// Allocation of a bit buffer or interning table failed.
    #[error("allocation failure: {message}")]
    AllocationFailure {
        /// Description of what allocation failed.
        message: String,
    },

    /// A serialized core was short, truncated, or internally inconsistent.
    #[error("corrupted core data: {message}")]
    CorruptedCore {
        /// Description of the inconsistency.
        message: String,
    },
}

/// Result type alias for `lcp-core` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid alphabet argument error.
    pub fn invalid_alphabet_argument(message: impl Into<String>) -> Self {
        Self::InvalidAlphabetArgument {
            message: message.into(),
        }
    }

    /// Create a malformed alphabet file error.
    pub fn malformed_alphabet_file(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedAlphabetFile {
            line,
            message: message.into(),
        }
    }

    /// Create an allocation failure error.
    pub fn allocation_failure(message: impl Into<String>) -> Self {
        Self::AllocationFailure {
            message: message.into(),
        }
    }

    /// Create a corrupted core error.
    pub fn corrupted_core(message: impl Into<String>) -> Self {
        Self::CorruptedCore {
            message: message.into(),
        }
    }
}
