//! Owned byte buffer with a bounds-checked read offset.

use crate::BufferError;

/// A byte buffer with an append-only write end and a read offset.
///
/// Reads never advance past the end of the buffer: a read of `n` bytes either
/// returns exactly `n` bytes and moves the offset by `n`, or fails with
/// [`BufferError::Overflow`] and leaves the offset untouched.
///
/// # Example
///
/// ```
/// use thrift_buffers::ByteCursor;
///
/// let mut cursor = ByteCursor::new();
/// cursor.write(&[0x00, 0x39]);
/// assert_eq!(cursor.read(2).unwrap(), &[0x00, 0x39]);
/// assert!(cursor.read(1).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteCursor {
    bytes: Vec<u8>,
    offset: usize,
}

impl ByteCursor {
    /// Creates an empty cursor for writing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cursor with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            offset: 0,
        }
    }

    /// Total number of bytes held, read or not.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Current read offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Borrows the whole buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the cursor and returns the buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }

    // ---------------------------------------------------------------- reads

    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if n > remaining {
            Err(BufferError::Overflow {
                requested: n,
                remaining,
            })
        } else {
            Ok(())
        }
    }

    /// Reads `n` bytes and advances the offset.
    pub fn read(&mut self, n: usize) -> Result<&[u8], BufferError> {
        self.check(n)?;
        let start = self.offset;
        self.offset += n;
        Ok(&self.bytes[start..self.offset])
    }

    /// Reads exactly `N` bytes into an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.offset..self.offset + N]);
        self.offset += N;
        Ok(out)
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.bytes[self.offset];
        self.offset += 1;
        Ok(val)
    }

    /// Looks at the next byte without advancing.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.check(1)?;
        Ok(self.bytes[self.offset])
    }

    /// Moves the read offset back by `n` bytes.
    ///
    /// Only used to un-read a header the caller already consumed.
    pub fn rewind(&mut self, n: usize) -> Result<(), BufferError> {
        if n > self.offset {
            return Err(BufferError::RewindPastStart {
                requested: n,
                offset: self.offset,
            });
        }
        self.offset -= n;
        Ok(())
    }

    // ---------------------------------------------------------------- writes

    /// Appends bytes to the end of the buffer.
    #[inline]
    pub fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends one byte.
    #[inline]
    pub fn write_u8(&mut self, byte: u8) {
        self.bytes.push(byte);
    }
}

impl From<Vec<u8>> for ByteCursor {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes, offset: 0 }
    }
}

impl From<&[u8]> for ByteCursor {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}
