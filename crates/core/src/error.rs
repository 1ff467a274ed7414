//! Error types for huffile.
//!
//! All fallible operations return structured errors rather than panicking.
//! A truncated bit stream during decoding is *not* an error: the decoder
//! reports it through [`crate::decoder::Termination::Truncated`].

use crate::symbol::Symbol;
use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Huffman: tree construction or encode failures
/// - Container: header parsing of a compressed artifact
/// - CRC: header corruption detected
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Huffman codec error (e.g., empty table, symbol without a code)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Container header error (e.g., bad magic, malformed entries)
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// Header CRC validation failed, indicating data corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Huffman codec errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols at all (cannot build a tree)
    #[error("empty frequency table: cannot build tree")]
    EmptyFrequencyTable,

    /// The encoder met a symbol the code table knows nothing about.
    ///
    /// Only reachable when the code table was derived from a different
    /// source than the one being encoded.
    #[error("no code for symbol {symbol}")]
    MissingCode { symbol: Symbol },

    /// Merging two nodes would exceed `u64::MAX` total weight
    #[error("node weight overflow: {zero} + {one}")]
    WeightOverflow { zero: u64, one: u64 },
}

/// Container header errors.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Input ended before the header was complete
    #[error("header too short: need at least {required} bytes, got {actual}")]
    HeaderTooShort { required: usize, actual: usize },

    /// Entry count outside 1..=257
    #[error("invalid entry count {0}")]
    EntryCount(u16),

    /// Symbol value outside 0..=256
    #[error("invalid symbol value {0}")]
    InvalidSymbol(u16),

    /// An entry declared a zero count
    #[error("symbol {0} has a zero count")]
    ZeroCount(Symbol),

    /// The same symbol appeared twice
    #[error("duplicate symbol {0}")]
    DuplicateSymbol(Symbol),

    /// The table has no end-of-stream entry
    #[error("frequency table has no end-of-stream entry")]
    MissingEndOfStream,

    /// The counts add up to more than `u64::MAX`
    #[error("symbol counts overflow at {0}")]
    CountOverflow(Symbol),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
