//! Explicit run configuration, replacing the reference tool's process-wide debug flag.

/// Which direction the stream driver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// CSV in, binary out.
    Compress,
    /// Binary in, CSV out.
    Decompress,
}

/// Run configuration threaded explicitly into [`crate::stream::compress`] and
/// [`crate::stream::decompress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Compress or decompress.
    pub mode: Mode,
    /// When compressing, divert the serialized dictionary to a scratch sink instead of the
    /// output stream, so the output contains only encoded records. The result is not
    /// decodable; this is intended for measuring the size of the record stream alone.
    pub debug: bool,
}

impl Config {
    /// Build a compress configuration.
    pub fn compress(debug: bool) -> Self {
        Self { mode: Mode::Compress, debug }
    }

    /// Build a decompress configuration. `debug` has no effect on decompression.
    pub fn decompress() -> Self {
        Self { mode: Mode::Decompress, debug: false }
    }
}
