//! Zigzag transforms and unsigned LEB128.
//!
//! The Compact protocol writes every signed integer as
//! `LEB128(zigzag(v))` and reads it back as `unzigzag(LEB128_decode(..))`.

use thrift_buffers::ByteCursor;

use crate::error::DecodeError;

// ---------------------------------------------------------------- zigzag

#[inline]
pub fn zigzag_i16(n: i16) -> u16 {
    ((n << 1) ^ (n >> 15)) as u16
}

#[inline]
pub fn zigzag_i32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

#[inline]
pub fn zigzag_i64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline]
pub fn unzigzag_i16(n: u16) -> i16 {
    ((n >> 1) as i16) ^ -((n & 1) as i16)
}

#[inline]
pub fn unzigzag_i32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

#[inline]
pub fn unzigzag_i64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

// ---------------------------------------------------------------- LEB128

/// Appends `n` as unsigned LEB128: 7 bits per byte, low group first, the
/// continuation bit set on every byte but the last.
pub fn write_varint(cursor: &mut ByteCursor, mut n: u64) {
    loop {
        let low7 = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            cursor.write_u8(low7);
            return;
        }
        cursor.write_u8(low7 | 0x80);
    }
}

/// Reads an unsigned LEB128 value of at most 10 bytes.
pub fn read_varint_u64(cursor: &mut ByteCursor) -> Result<u64, DecodeError> {
    let mut result: u64 = 0;
    let mut shift = 0u32;
    for _ in 0..10 {
        let b = cursor.read_u8()? as u64;
        result |= (b & 0x7f) << shift;
        if b & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
    }
    Err(DecodeError::VarintOverflow)
}

/// Reads an unsigned LEB128 value of at most 5 bytes.
pub fn read_varint_u32(cursor: &mut ByteCursor) -> Result<u32, DecodeError> {
    let mut result: u32 = 0;
    let mut shift = 0u32;
    for _ in 0..5 {
        let b = cursor.read_u8()? as u32;
        result |= (b & 0x7f) << shift;
        if b & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
    }
    Err(DecodeError::VarintOverflow)
}
