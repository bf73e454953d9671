use thiserror::Error;

use crate::types::TypeTag;

/// Unified error type for rowkey encoding, decoding and coercion.
///
/// Buffer and stream errors are ordinary outcomes of untrusted input.
/// `ArityMismatch` and `UnexpectedNullStorage` mean the caller wired
/// things up wrong; see [`Error::is_caller_misuse`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Destination buffer cannot hold the encoded bytes.
    #[error("buffer too small: need {needed} bytes, {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    /// Decoded element count exceeds the slots reserved by the caller.
    #[error("element count {count} exceeds reserved capacity {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },

    /// Input ended in the middle of a varint or an element.
    #[error("input truncated mid-element")]
    TruncatedInput,

    /// Stream decode stopped with unconsumed trailing bytes.
    #[error("stream size mismatch: consumed {consumed} of {len} bytes")]
    SizeOverflow { consumed: usize, len: usize },

    /// Rowkey arity disagrees with the key schema.
    #[error("rowkey has {rowkey} columns, schema has {schema}")]
    ArityMismatch { schema: usize, rowkey: usize },

    /// A value cannot be coerced to the declared column type.
    #[error("cannot cast {from:?} to {to:?}")]
    CastFailure { from: TypeTag, to: TypeTag },

    /// Decode target has no backing value slots at all.
    #[error("rowkey has no backing storage")]
    UnexpectedNullStorage,

    /// Bytes are well-sized but malformed (bad tag, overlong varint).
    #[error("corruption: {0}")]
    Corruption(String),
}

impl Error {
    /// True for errors that indicate a programming defect in the caller
    /// rather than bad input.
    pub fn is_caller_misuse(&self) -> bool {
        matches!(self, Error::ArityMismatch { .. } | Error::UnexpectedNullStorage)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
