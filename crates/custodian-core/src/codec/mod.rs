mod cursor;
pub mod header;
pub mod payload;

pub use cursor::Cursor;
pub use header::{decode_block_header, decode_finalization_proof, encode_block_header, encode_finalization_proof};
pub use payload::{decode_execution_payload, encode_execution_payload};

use thiserror::Error;

/// Errors from decoding the fixed little-endian wire formats of §4.1.
///
/// The codec is total on well-formed input: every failure mode is one of
/// these two variants, never a panic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("truncated input while decoding {context}: needed {needed} bytes, {available} available")]
    Truncated {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("length mismatch while decoding {context}: expected {expected} bytes, got {got}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },
}
