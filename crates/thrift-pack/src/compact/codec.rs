//! Compact Protocol codec.
//!
//! Encoding rules:
//! - i16/i32/i64: zigzag + unsigned LEB128 (i16 is promoted to i32)
//! - double: 8 bytes IEEE-754, little-endian
//! - string/binary: LEB128 length + raw bytes
//! - bool struct field: folded into the field header nibble, no value byte
//! - bool collection element: one explicit byte
//! - field header: `(delta << 4) | nibble` when the id grew by 1..=15,
//!   otherwise the nibble alone followed by the zigzag id as a Standard i16
//! - list/set header: `(size << 4) | nibble` below 15, else `0xF0 | nibble`
//!   + LEB128 size
//! - map header: a single zero byte when empty, else LEB128 size +
//!   `(key_nibble << 4) | value_nibble`

use thrift_buffers::ByteCursor;

use crate::binary::{put_i16, take_i16};
use crate::codec::{FieldHeader, ListHeader, MapHeader, WireCodec};
use crate::config::Protocol;
use crate::error::DecodeError;
use crate::varint::{
    read_varint_u32, read_varint_u64, unzigzag_i16, unzigzag_i32, unzigzag_i64, write_varint,
    zigzag_i16, zigzag_i32, zigzag_i64,
};
use crate::wire_type::WireType;

const BOOL_TRUE_NIBBLE: u8 = 1;
const BOOL_FALSE_NIBBLE: u8 = 2;
const LONG_SIZE_NIBBLE: u8 = 0x0f;

/// Element type nibble of a collection header. Writers that follow the
/// reference implementation tag boolean elements with the "true" nibble.
fn collection_element_type(nibble: u8) -> Result<WireType, DecodeError> {
    match nibble {
        BOOL_TRUE_NIBBLE => Ok(WireType::Bool),
        other => WireType::from_compact_nibble(other),
    }
}

/// Compact Protocol reader/writer over one buffer.
///
/// Tracks the previous field id of the structure being walked; nested
/// structures push it on entry and restore it on exit so every structure's
/// delta encoding starts from 0.
#[derive(Debug, Clone, Default)]
pub struct CompactCodec {
    cursor: ByteCursor,
    last_field_id: i16,
    field_id_stack: Vec<i16>,
    /// Field id of a bool field header waiting for its value.
    pending_bool_field: Option<i16>,
    /// Value of a bool field whose header has been read.
    pending_bool_value: Option<bool>,
}

impl CompactCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            cursor: ByteCursor::from(bytes),
            ..Self::default()
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }

    /// Previous field id of the current structure.
    pub fn last_field_id(&self) -> i16 {
        self.last_field_id
    }

    fn write_field_header(&mut self, nibble: u8, field_id: i16) {
        let delta = field_id as i32 - self.last_field_id as i32;
        if delta > 0 && delta <= 15 {
            self.cursor.write_u8(((delta as u8) << 4) | nibble);
        } else {
            self.cursor.write_u8(nibble);
            // Deliberately the Standard protocol's i16 writer, not a varint.
            put_i16(&mut self.cursor, zigzag_i16(field_id) as i16);
        }
        self.last_field_id = field_id;
    }

    fn write_collection_header(&mut self, element_type: WireType, size: usize) {
        let nibble = element_type.to_compact_nibble();
        if size < 15 {
            self.cursor.write_u8(((size as u8) << 4) | nibble);
        } else {
            self.cursor.write_u8(0xf0 | nibble);
            write_varint(&mut self.cursor, size as u64);
        }
    }

    fn enter_struct(&mut self) {
        self.field_id_stack.push(self.last_field_id);
        self.last_field_id = 0;
    }

    fn leave_struct(&mut self) {
        self.last_field_id = self.field_id_stack.pop().unwrap_or(0);
    }
}

impl WireCodec for CompactCodec {
    fn protocol(&self) -> Protocol {
        Protocol::Compact
    }

    fn cursor(&self) -> &ByteCursor {
        &self.cursor
    }

    fn into_bytes(self: Box<Self>) -> Vec<u8> {
        self.cursor.into_inner()
    }

    // ---------------------------------------------------------------- write

    fn write_bool(&mut self, value: bool) {
        match self.pending_bool_field.take() {
            Some(field_id) => {
                let nibble = if value {
                    BOOL_TRUE_NIBBLE
                } else {
                    BOOL_FALSE_NIBBLE
                };
                self.write_field_header(nibble, field_id);
            }
            None => self.cursor.write_u8(value as u8),
        }
    }

    fn write_byte(&mut self, value: u8) {
        self.cursor.write_u8(value);
    }

    fn write_i16(&mut self, value: i16) {
        self.write_i32(value as i32);
    }

    fn write_i32(&mut self, value: i32) {
        write_varint(&mut self.cursor, zigzag_i32(value) as u64);
    }

    fn write_i64(&mut self, value: i64) {
        write_varint(&mut self.cursor, zigzag_i64(value));
    }

    fn write_double(&mut self, value: f64) {
        self.cursor.write(&value.to_bits().to_le_bytes());
    }

    fn write_binary(&mut self, value: &[u8]) {
        write_varint(&mut self.cursor, value.len() as u64);
        self.cursor.write(value);
    }

    /// A raw boolean struct field has no value bytes of its own: its first
    /// byte (1 = true) is folded into the pending header.
    fn write_raw(&mut self, bytes: &[u8]) {
        if self.pending_bool_field.is_some() {
            self.write_bool(bytes.first() == Some(&1));
            return;
        }
        self.cursor.write(bytes);
    }

    fn write_struct_begin(&mut self) {
        self.enter_struct();
    }

    fn write_struct_end(&mut self) {
        self.leave_struct();
    }

    fn write_field_begin(&mut self, wire_type: WireType, field_id: i16) {
        if wire_type == WireType::Bool {
            self.pending_bool_field = Some(field_id);
            return;
        }
        self.write_field_header(wire_type.to_compact_nibble(), field_id);
    }

    fn write_field_stop(&mut self) {
        self.cursor.write_u8(0);
    }

    fn write_list_begin(&mut self, element_type: WireType, size: usize) {
        self.write_collection_header(element_type, size);
    }

    fn write_set_begin(&mut self, element_type: WireType, size: usize) {
        self.write_collection_header(element_type, size);
    }

    fn write_map_begin(&mut self, key_type: WireType, value_type: WireType, size: usize) {
        if size == 0 {
            self.cursor.write_u8(0);
            return;
        }
        write_varint(&mut self.cursor, size as u64);
        self.cursor
            .write_u8((key_type.to_compact_nibble() << 4) | value_type.to_compact_nibble());
    }

    // ---------------------------------------------------------------- read

    fn read_bool(&mut self) -> Result<bool, DecodeError> {
        if let Some(value) = self.pending_bool_value.take() {
            return Ok(value);
        }
        Ok(self.cursor.read_u8()? == 1)
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.cursor.read_u8()?)
    }

    /// Truncates the decoded i32 to 16 bits without a range check.
    fn read_i16(&mut self) -> Result<i16, DecodeError> {
        Ok(self.read_i32()? as i16)
    }

    fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(unzigzag_i32(read_varint_u32(&mut self.cursor)?))
    }

    fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(unzigzag_i64(read_varint_u64(&mut self.cursor)?))
    }

    fn read_double(&mut self) -> Result<f64, DecodeError> {
        let bits = u64::from_le_bytes(self.cursor.read_array::<8>()?);
        Ok(f64::from_bits(bits))
    }

    fn read_binary(&mut self) -> Result<Vec<u8>, DecodeError> {
        let size = read_varint_u32(&mut self.cursor)? as usize;
        Ok(self.cursor.read(size)?.to_vec())
    }

    fn read_struct_begin(&mut self) {
        self.enter_struct();
    }

    fn read_struct_end(&mut self) {
        self.leave_struct();
    }

    fn read_field_begin(&mut self) -> Result<FieldHeader, DecodeError> {
        let byte = self.cursor.read_u8()?;
        let wire_type = WireType::from_compact_nibble(byte & 0x0f)?;
        if wire_type == WireType::Stop {
            return Ok(FieldHeader::STOP);
        }
        let delta = byte >> 4;
        let field_id = if delta == 0 {
            // Mirrors the writer: a Standard i16, not a varint.
            unzigzag_i16(take_i16(&mut self.cursor)? as u16)
        } else {
            self.last_field_id.wrapping_add(delta as i16)
        };
        self.last_field_id = field_id;
        let wire_type = match wire_type {
            WireType::Void => {
                self.pending_bool_value = Some(true);
                WireType::Bool
            }
            WireType::Bool => {
                self.pending_bool_value = Some(false);
                WireType::Bool
            }
            other => other,
        };
        Ok(FieldHeader {
            wire_type,
            field_id: Some(field_id),
        })
    }

    fn read_list_begin(&mut self) -> Result<ListHeader, DecodeError> {
        let byte = self.cursor.read_u8()?;
        let element_type = collection_element_type(byte & 0x0f)?;
        let short_size = byte >> 4;
        let size = if short_size == LONG_SIZE_NIBBLE {
            read_varint_u32(&mut self.cursor)? as usize
        } else {
            short_size as usize
        };
        Ok(ListHeader { element_type, size })
    }

    fn read_set_begin(&mut self) -> Result<ListHeader, DecodeError> {
        self.read_list_begin()
    }

    fn read_map_begin(&mut self) -> Result<MapHeader, DecodeError> {
        if self.cursor.peek()? == 0 {
            self.cursor.read_u8()?;
            return Ok(MapHeader {
                key_type: WireType::Stop,
                value_type: WireType::Stop,
                size: 0,
            });
        }
        let size = read_varint_u32(&mut self.cursor)? as usize;
        let types = self.cursor.read_u8()?;
        Ok(MapHeader {
            key_type: collection_element_type(types >> 4)?,
            value_type: collection_element_type(types & 0x0f)?,
            size,
        })
    }
}
