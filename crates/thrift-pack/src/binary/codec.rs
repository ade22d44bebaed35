//! Standard Binary Protocol codec.
//!
//! Encoding rules (all multi-byte values big-endian):
//! - bool: 1 byte (0/1), byte: 1 byte
//! - i16/i32/i64: 2/4/8 bytes two's complement
//! - double: 8 bytes IEEE-754 bit pattern
//! - string/binary: i32 length + raw bytes
//! - field header: type byte, then i16 field id unless the type is stop
//! - list/set header: element type byte + i32 count
//! - map header: key type byte + value type byte + i32 count

use thrift_buffers::ByteCursor;

use crate::codec::{FieldHeader, ListHeader, MapHeader, WireCodec};
use crate::config::Protocol;
use crate::error::DecodeError;
use crate::wire_type::WireType;

// ---------------------------------------------------------------- primitives

// The Compact codec reuses these two for its long-form field id.

#[inline]
pub(crate) fn put_i16(cursor: &mut ByteCursor, value: i16) {
    cursor.write(&value.to_be_bytes());
}

#[inline]
pub(crate) fn take_i16(cursor: &mut ByteCursor) -> Result<i16, DecodeError> {
    Ok(i16::from_be_bytes(cursor.read_array::<2>()?))
}

fn take_size(cursor: &mut ByteCursor) -> Result<usize, DecodeError> {
    let size = i32::from_be_bytes(cursor.read_array::<4>()?);
    if size < 0 {
        return Err(DecodeError::NegativeSize(size as i64));
    }
    Ok(size as usize)
}

/// Standard Binary Protocol reader/writer over one buffer.
#[derive(Debug, Clone, Default)]
pub struct BinaryCodec {
    cursor: ByteCursor,
}

impl BinaryCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            cursor: ByteCursor::from(bytes),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }

    /// Un-reads a field type tag (1 byte).
    pub fn unread_field_type(&mut self) -> Result<(), DecodeError> {
        self.cursor.rewind(1)?;
        Ok(())
    }

    /// Un-reads a field type tag and field id (3 bytes).
    pub fn unread_field_header(&mut self) -> Result<(), DecodeError> {
        self.cursor.rewind(3)?;
        Ok(())
    }
}

impl WireCodec for BinaryCodec {
    fn protocol(&self) -> Protocol {
        Protocol::Standard
    }

    fn cursor(&self) -> &ByteCursor {
        &self.cursor
    }

    fn into_bytes(self: Box<Self>) -> Vec<u8> {
        self.cursor.into_inner()
    }

    // ---------------------------------------------------------------- write

    fn write_bool(&mut self, value: bool) {
        self.cursor.write_u8(value as u8);
    }

    fn write_byte(&mut self, value: u8) {
        self.cursor.write_u8(value);
    }

    fn write_i16(&mut self, value: i16) {
        put_i16(&mut self.cursor, value);
    }

    fn write_i32(&mut self, value: i32) {
        self.cursor.write(&value.to_be_bytes());
    }

    fn write_i64(&mut self, value: i64) {
        self.cursor.write(&value.to_be_bytes());
    }

    fn write_double(&mut self, value: f64) {
        self.cursor.write(&value.to_bits().to_be_bytes());
    }

    fn write_binary(&mut self, value: &[u8]) {
        self.write_i32(value.len() as i32);
        self.cursor.write(value);
    }

    fn write_raw(&mut self, bytes: &[u8]) {
        self.cursor.write(bytes);
    }

    fn write_struct_begin(&mut self) {}

    fn write_struct_end(&mut self) {}

    fn write_field_begin(&mut self, wire_type: WireType, field_id: i16) {
        self.cursor.write_u8(wire_type.to_standard_byte());
        put_i16(&mut self.cursor, field_id);
    }

    fn write_field_stop(&mut self) {
        self.cursor.write_u8(WireType::Stop.to_standard_byte());
    }

    fn write_list_begin(&mut self, element_type: WireType, size: usize) {
        self.cursor.write_u8(element_type.to_standard_byte());
        self.write_i32(size as i32);
    }

    fn write_set_begin(&mut self, element_type: WireType, size: usize) {
        self.cursor.write_u8(element_type.to_standard_byte());
        self.write_i32(size as i32);
    }

    fn write_map_begin(&mut self, key_type: WireType, value_type: WireType, size: usize) {
        self.cursor.write_u8(key_type.to_standard_byte());
        self.cursor.write_u8(value_type.to_standard_byte());
        self.write_i32(size as i32);
    }

    // ---------------------------------------------------------------- read

    fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.cursor.read_u8()? == 1)
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.cursor.read_u8()?)
    }

    fn read_i16(&mut self) -> Result<i16, DecodeError> {
        take_i16(&mut self.cursor)
    }

    fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.cursor.read_array::<4>()?))
    }

    fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(i64::from_be_bytes(self.cursor.read_array::<8>()?))
    }

    fn read_double(&mut self) -> Result<f64, DecodeError> {
        let bits = u64::from_be_bytes(self.cursor.read_array::<8>()?);
        Ok(f64::from_bits(bits))
    }

    fn read_binary(&mut self) -> Result<Vec<u8>, DecodeError> {
        let size = take_size(&mut self.cursor)?;
        Ok(self.cursor.read(size)?.to_vec())
    }

    fn read_struct_begin(&mut self) {}

    fn read_struct_end(&mut self) {}

    fn read_field_begin(&mut self) -> Result<FieldHeader, DecodeError> {
        let wire_type = WireType::from_standard_byte(self.cursor.read_u8()?)?;
        if wire_type == WireType::Stop {
            return Ok(FieldHeader::STOP);
        }
        let field_id = take_i16(&mut self.cursor)?;
        Ok(FieldHeader {
            wire_type,
            field_id: Some(field_id),
        })
    }

    fn read_list_begin(&mut self) -> Result<ListHeader, DecodeError> {
        let element_type = WireType::from_standard_byte(self.cursor.read_u8()?)?;
        let size = take_size(&mut self.cursor)?;
        Ok(ListHeader { element_type, size })
    }

    fn read_set_begin(&mut self) -> Result<ListHeader, DecodeError> {
        self.read_list_begin()
    }

    fn read_map_begin(&mut self) -> Result<MapHeader, DecodeError> {
        let key_type = WireType::from_standard_byte(self.cursor.read_u8()?)?;
        let value_type = WireType::from_standard_byte(self.cursor.read_u8()?)?;
        let size = take_size(&mut self.cursor)?;
        Ok(MapHeader {
            key_type,
            value_type,
            size,
        })
    }
}
