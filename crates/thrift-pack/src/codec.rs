//! The interface shared by the Standard and Compact protocol codecs.
//!
//! A codec owns one [`ByteCursor`] for a single encode or decode call. The
//! traversal engine drives it through `&mut dyn WireCodec`, so the protocol
//! is picked once per call and never consulted again.

use thrift_buffers::ByteCursor;

use crate::binary::BinaryCodec;
use crate::compact::CompactCodec;
use crate::config::Protocol;
use crate::error::DecodeError;
use crate::wire_type::WireType;

/// A decoded field header. `field_id` is `None` only for field-stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    pub wire_type: WireType,
    pub field_id: Option<i16>,
}

impl FieldHeader {
    pub const STOP: FieldHeader = FieldHeader {
        wire_type: WireType::Stop,
        field_id: None,
    };

    pub fn is_stop(&self) -> bool {
        self.wire_type == WireType::Stop
    }
}

/// A decoded list or set header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    pub element_type: WireType,
    pub size: usize,
}

/// A decoded map header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    pub key_type: WireType,
    pub value_type: WireType,
    pub size: usize,
}

/// Read and write primitives of one Thrift protocol.
pub trait WireCodec {
    fn protocol(&self) -> Protocol;

    fn cursor(&self) -> &ByteCursor;

    /// Bytes left to read.
    fn remaining(&self) -> usize {
        self.cursor().remaining()
    }

    /// Hands back the written buffer.
    fn into_bytes(self: Box<Self>) -> Vec<u8>;

    // ---------------------------------------------------------------- write

    fn write_bool(&mut self, value: bool);
    fn write_byte(&mut self, value: u8);
    fn write_i16(&mut self, value: i16);
    fn write_i32(&mut self, value: i32);
    fn write_i64(&mut self, value: i64);
    fn write_double(&mut self, value: f64);
    fn write_binary(&mut self, value: &[u8]);

    fn write_string(&mut self, value: &str) {
        self.write_binary(value.as_bytes());
    }

    /// Splices already-encoded bytes into the stream verbatim.
    fn write_raw(&mut self, bytes: &[u8]);

    fn write_struct_begin(&mut self);
    fn write_struct_end(&mut self);
    fn write_field_begin(&mut self, wire_type: WireType, field_id: i16);
    fn write_field_stop(&mut self);
    fn write_list_begin(&mut self, element_type: WireType, size: usize);
    fn write_set_begin(&mut self, element_type: WireType, size: usize);
    fn write_map_begin(&mut self, key_type: WireType, value_type: WireType, size: usize);

    // ---------------------------------------------------------------- read

    fn read_bool(&mut self) -> Result<bool, DecodeError>;
    fn read_byte(&mut self) -> Result<u8, DecodeError>;
    fn read_i16(&mut self) -> Result<i16, DecodeError>;
    fn read_i32(&mut self) -> Result<i32, DecodeError>;
    fn read_i64(&mut self) -> Result<i64, DecodeError>;
    fn read_double(&mut self) -> Result<f64, DecodeError>;
    fn read_binary(&mut self) -> Result<Vec<u8>, DecodeError>;

    /// Reads a string, failing with [`DecodeError::InvalidUtf8`] carrying the
    /// offending bytes when they are not UTF-8.
    fn read_string(&mut self) -> Result<String, DecodeError> {
        let bytes = self.read_binary()?;
        String::from_utf8(bytes).map_err(|err| DecodeError::InvalidUtf8(err.into_bytes()))
    }

    fn read_struct_begin(&mut self);
    fn read_struct_end(&mut self);
    fn read_field_begin(&mut self) -> Result<FieldHeader, DecodeError>;
    fn read_list_begin(&mut self) -> Result<ListHeader, DecodeError>;
    fn read_set_begin(&mut self) -> Result<ListHeader, DecodeError>;
    fn read_map_begin(&mut self) -> Result<MapHeader, DecodeError>;
}

/// Creates an empty codec for writing.
pub fn new_writer(protocol: Protocol) -> Box<dyn WireCodec> {
    match protocol {
        Protocol::Standard => Box::new(BinaryCodec::new()),
        Protocol::Compact => Box::new(CompactCodec::new()),
    }
}

/// Creates a codec reading `bytes`.
pub fn new_reader(protocol: Protocol, bytes: &[u8]) -> Box<dyn WireCodec> {
    match protocol {
        Protocol::Standard => Box::new(BinaryCodec::from_bytes(bytes)),
        Protocol::Compact => Box::new(CompactCodec::from_bytes(bytes)),
    }
}
