//! Error types for ETH Comfort bitstream decoding

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error types encountered while recovering bits from the chip stream
///
/// Both variants are recoverable line errors: the decoder responds by
/// desynchronizing the affected phase channel and searching for the next
/// sync word, never by aborting the telegram.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Chip pair that is not a valid Manchester symbol (`00` or `11`)
    #[error("Illegal Manchester symbol: {0}")]
    IllegalSymbol(String),

    /// More consecutive one-bits than bit stuffing allows on the wire
    #[error("Illegal one-run: {0}")]
    IllegalRun(String),
}

impl CodecError {
    /// Create a new IllegalSymbol error
    pub fn illegal_symbol(msg: impl Into<String>) -> Self {
        CodecError::IllegalSymbol(msg.into())
    }

    /// Create a new IllegalRun error
    pub fn illegal_run(msg: impl Into<String>) -> Self {
        CodecError::IllegalRun(msg.into())
    }
}
