//! Crate-wide error type for every fallible codec operation.

use thiserror::Error;

/// Errors that can occur while parsing, encoding, or decoding trade tick records.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A CSV line had fewer than eight comma-separated fields.
    #[error("malformed record at line {line}: expected 8 fields, found {fields}")]
    MalformedRecord {
        /// 1-based line number within the input stream.
        line: usize,
        /// Number of comma-separated fields actually present.
        fields: usize,
    },

    /// The side field of a CSV record did not match any recognized code.
    #[error("unrecognized side code '{ch}' at line {line}")]
    UnknownSide {
        /// 1-based line number within the input stream.
        line: usize,
        /// The offending character.
        ch: char,
    },

    /// The flag bits 0..2 of a decoded record did not match any known side encoding.
    #[error("unrecognized side bit pattern {bits:#05b}")]
    InvalidSideBits {
        /// The raw flags byte, masked to bits 0..2.
        bits: u8,
    },

    /// The ticker dictionary already holds 65535 distinct symbols.
    #[error("dictionary full: cannot assign an id beyond 65535")]
    DictionaryFull,

    /// A decoded record referenced a ticker id absent from the dictionary.
    #[error("unknown ticker id {id} referenced by record")]
    UnknownTicker {
        /// The dictionary id that could not be resolved.
        id: u16,
    },

    /// The input ended mid-record, or had trailing bytes shorter than one record.
    #[error("truncated input: expected {expected} bytes, got {got}")]
    TruncatedInput {
        /// Number of bytes the current read required.
        expected: usize,
        /// Number of bytes actually available.
        got: usize,
    },

    /// A price field could not be parsed as a signed decimal.
    #[error("invalid price text {text:?}")]
    InvalidPrice {
        /// The text that failed to parse.
        text: String,
    },

    /// An underlying I/O operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
