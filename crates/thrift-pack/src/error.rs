//! Encode and decode error types.

use thrift_buffers::BufferError;

use crate::wire_type::WireType;

/// Error raised while reading a Thrift message.
///
/// Every variant is fatal to the decode call that produced it; the cursor
/// position is not meaningful afterwards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("read of {requested} bytes overflows buffer ({remaining} remaining)")]
    BufferOverflow { requested: usize, remaining: usize },
    #[error("cannot rewind {requested} bytes from offset {offset}")]
    RewindPastStart { requested: usize, offset: usize },
    #[error("unsupported wire type: {0}")]
    UnsupportedWireType(u8),
    #[error("string data is not valid UTF-8")]
    InvalidUtf8(Vec<u8>),
    #[error("type has no thrift representation: {0}")]
    UndecodableType(&'static str),
    #[error("variable-length integer is too long")]
    VarintOverflow,
    #[error("negative size: {0}")]
    NegativeSize(i64),
    #[error("required field {0} is missing")]
    MissingField(i16),
    #[error("expected {expected}, found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid enum value: {0}")]
    InvalidEnumValue(i32),
    #[error("nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),
    #[error("container size {size} exceeds limit of {limit}")]
    SizeLimitExceeded { size: usize, limit: usize },
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::Overflow {
                requested,
                remaining,
            } => DecodeError::BufferOverflow {
                requested,
                remaining,
            },
            BufferError::RewindPastStart { requested, offset } => {
                DecodeError::RewindPastStart { requested, offset }
            }
        }
    }
}

/// Error raised while writing a Thrift message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("encoder has no buffer; write called outside of encode")]
    UninitializedBuffer,
    #[error("field descriptor has no field id")]
    MissingFieldIdentifier,
    #[error("type has no thrift representation: {0}")]
    UnencodableType(&'static str),
    #[error("validation failed: {0}")]
    ValidationFailure(String),
    #[error("collection element is absent")]
    AbsentElement,
    #[error("wire value cannot be written as {0}")]
    MismatchedWireValue(WireType),
}
