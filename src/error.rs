//! Error types shared across the packet parser, payload decoders, and
//! aggregation passes.
//!
//! Every fallible operation in this crate returns a `Result<_, DecodeError>`.
//! There is no panic-based control flow outside `#[cfg(test)]` code.

use thiserror::Error;

/// Errors produced while parsing or decoding a Sentinel-1 Level 0 file.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The file ended before the packet boundary implied by a previously
    /// read `packet_data_length` field.
    #[error("truncated file: expected packet of {expected_len} bytes at offset {offset}, only {available} bytes remain")]
    TruncatedFile {
        offset: u64,
        expected_len: usize,
        available: usize,
    },

    /// The bit reader was exhausted while decoding a symbol or fixed-width
    /// field inside a packet payload.
    #[error("truncated payload: needed {needed} more bits at bit offset {bit_offset}, {remaining} remain")]
    TruncatedPayload {
        bit_offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A selection to decode contained a packet whose BAQ mode is one of
    /// the reserved 3/4/5-bit BAQ variants.
    #[error("unsupported BAQ mode {mode:?} at row {row}")]
    UnsupportedBaq { mode: crate::header::BaqMode, row: usize },

    /// A batch passed to the batch executor was not homogeneous in
    /// `num_quads`.
    #[error("inconsistent chunk: row {row} has num_quads={actual}, expected {expected}")]
    InconsistentChunk {
        row: usize,
        expected: u16,
        actual: u16,
    },

    /// A Huffman-coded bit pattern did not resolve to any leaf within the
    /// maximum code length for the active BRC. Indicates payload corruption.
    #[error("Huffman overflow decoding BRC {brc} at bit offset {bit_offset}")]
    HuffmanOverflow { brc: u8, bit_offset: usize },

    /// The underlying file could not be opened or memory-mapped.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for DecodeError {
    fn from(error: std::io::Error) -> Self {
        DecodeError::Io {
            message: error.to_string(),
        }
    }
}

/// Shorthand for every fallible operation in this crate.
///
/// Note that an out-of-range or undefined coded field (BAQ mode, signal
/// type, and so on) is never a [`DecodeError`] on its own: it never aborts
/// header parsing (see [`crate::header`]) and is instead retained as a
/// `Reserved(raw)` variant on the relevant typed enum.
pub type DecodeResult<T> = Result<T, DecodeError>;
