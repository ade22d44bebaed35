//! Byte buffer primitives for the Thrift wire codecs.
//!
//! A [`ByteCursor`] owns one message buffer for the duration of a single
//! encode or decode call: writes append, reads are bounds-checked and advance
//! the read offset only on success.

mod cursor;

pub use cursor::ByteCursor;

/// Error returned by bounds-checked cursor operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("read of {requested} bytes overflows buffer ({remaining} remaining)")]
    Overflow { requested: usize, remaining: usize },
    #[error("cannot rewind {requested} bytes from offset {offset}")]
    RewindPastStart { requested: usize, offset: usize },
}
