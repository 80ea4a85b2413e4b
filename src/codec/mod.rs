//! Persistence codecs for the dictionary.
//!
//! The only format is the comma-separated flat file in [`flat_file`].

pub mod flat_file;

pub use flat_file::{
    check_record, check_store, check_word, decode, decode_into, encode, DecodeStats,
    FIELD_SEPARATOR,
};

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The underlying stream could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A word or definition cannot be written without changing on reload.
    #[error("Cannot store '{word}': {reason}")]
    InvalidRecord {
        /// The offending word, decoded lossily for display.
        word: String,
        /// What makes the record unrepresentable.
        reason: &'static str,
    },
}
