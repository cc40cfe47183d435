//! A two-pass codec for trade tick records: CSV in, a compact bit-packed binary out, and back.
//!
//! The binary format opens with a serialized ticker dictionary (see [`dictionary`]) followed
//! by one bit-packed record per input line (see [`encoder`]/[`decoder`]). [`stream::compress`]
//! and [`stream::decompress`] drive the two directions end to end.

#![warn(missing_debug_implementations)]

/// Run configuration (compress vs. decompress, debug dictionary routing).
pub mod config;
/// Inverse of [`encoder`]: reconstructs CSV lines from bit-packed binary records.
pub mod decoder;
/// The ticker dictionary: an ordered id↔symbol table with frequency accounting.
pub mod dictionary;
/// Per-record bit-packed binary encoding.
pub mod encoder;
/// Crate-wide error type for every fallible codec operation.
pub mod error;
/// Price representation and its string parse/format rules.
pub mod price;
/// CSV record parsing: the `Side` tagged enum and `TradeRecord`.
pub mod record;
/// Two-pass compress and single-pass decompress orchestration.
pub mod stream;

pub use config::{Config, Mode};
pub use decoder::DecoderState;
pub use dictionary::{DictionaryEntry, TickerDictionary};
pub use encoder::EncoderState;
pub use error::CodecError;
pub use price::Price;
pub use record::{Side, TradeRecord};
pub use stream::{compress, decompress};
