//! Generic decoder: reads a message into a [`WireValue`] tree, then hands the
//! tree to the target type.
//!
//! Reading is driven by the tags on the wire alone, so any well-formed
//! message parses whatever the target type expects; fields the target does
//! not know are read in full and dropped by [`StructReader`].
//!
//! [`StructReader`]: crate::StructReader

use std::collections::BTreeMap;

use crate::codec::{new_reader, WireCodec};
use crate::config::{DecoderConfig, Protocol};
use crate::error::DecodeError;
use crate::schema::ThriftDecode;
use crate::wire_type::WireType;
use crate::wire_value::{FieldValue, WireValue};

/// Thrift decoder for one protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThriftDecoder {
    protocol: Protocol,
    config: DecoderConfig,
}

impl ThriftDecoder {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            config: DecoderConfig::default(),
        }
    }

    pub fn with_config(protocol: Protocol, config: DecoderConfig) -> Self {
        Self { protocol, config }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes a root of type `T`. Bytes after the root are ignored.
    pub fn decode<T: ThriftDecode>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        let wire_type =
            T::wire_type().ok_or(DecodeError::UndecodableType(std::any::type_name::<T>()))?;
        let value = self.decode_wire_as(bytes, wire_type)?;
        T::decode_wire(&value)
    }

    /// Decodes a root struct without a target type.
    pub fn decode_wire(&self, bytes: &[u8]) -> Result<WireValue, DecodeError> {
        self.decode_wire_as(bytes, WireType::Struct)
    }

    /// Decodes a root of any wire type without a target type.
    pub fn decode_wire_as(
        &self,
        bytes: &[u8],
        wire_type: WireType,
    ) -> Result<WireValue, DecodeError> {
        let mut reader = WireReader {
            codec: new_reader(self.protocol, bytes),
            config: self.config,
            depth: 0,
        };
        let value = reader.read_value(wire_type)?;
        tracing::trace!(
            protocol = ?self.protocol,
            bytes = bytes.len(),
            consumed = bytes.len() - reader.codec.remaining(),
            "decoded thrift message"
        );
        Ok(value)
    }
}

struct WireReader {
    codec: Box<dyn WireCodec>,
    config: DecoderConfig,
    depth: usize,
}

impl WireReader {
    fn enter(&mut self) -> Result<(), DecodeError> {
        if let Some(limit) = self.config.max_depth {
            if self.depth > limit {
                return Err(DecodeError::DepthLimitExceeded(limit));
            }
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn check_size(&self, size: usize) -> Result<(), DecodeError> {
        match self.config.max_container_size {
            Some(limit) if size > limit => Err(DecodeError::SizeLimitExceeded { size, limit }),
            _ => Ok(()),
        }
    }

    /// Capacity is capped by the remaining input: every element type but
    /// stop and void takes at least one byte, and those two are refused.
    fn reserve<T>(&self, size: usize, element_types: &[WireType]) -> Result<Vec<T>, DecodeError> {
        self.check_size(size)?;
        if size > 0 {
            if let Some(empty) = element_types
                .iter()
                .find(|t| matches!(t, WireType::Stop | WireType::Void))
            {
                return Err(DecodeError::UnsupportedWireType(empty.to_standard_byte()));
            }
        }
        Ok(Vec::with_capacity(size.min(self.codec.remaining())))
    }

    fn read_value(&mut self, wire_type: WireType) -> Result<WireValue, DecodeError> {
        let codec = &mut self.codec;
        Ok(match wire_type {
            WireType::Stop | WireType::Void => WireValue::FieldStop,
            WireType::Bool => WireValue::Scalar(vec![codec.read_bool()? as u8]),
            WireType::Byte => WireValue::Scalar(vec![codec.read_byte()?]),
            WireType::I16 => WireValue::Scalar(codec.read_i16()?.to_be_bytes().to_vec()),
            WireType::I32 => WireValue::Scalar(codec.read_i32()?.to_be_bytes().to_vec()),
            WireType::I64 => WireValue::Scalar(codec.read_i64()?.to_be_bytes().to_vec()),
            WireType::Double => {
                WireValue::Scalar(codec.read_double()?.to_bits().to_be_bytes().to_vec())
            }
            WireType::StringOrBinary => WireValue::Scalar(codec.read_binary()?),
            WireType::Struct => {
                self.enter()?;
                let value = self.read_struct()?;
                self.leave();
                value
            }
            WireType::List | WireType::Set => {
                self.enter()?;
                let value = self.read_list(wire_type)?;
                self.leave();
                value
            }
            WireType::Map => {
                self.enter()?;
                let value = self.read_map()?;
                self.leave();
                value
            }
        })
    }

    fn read_struct(&mut self) -> Result<WireValue, DecodeError> {
        self.codec.read_struct_begin();
        let mut fields = BTreeMap::new();
        loop {
            let header = self.codec.read_field_begin()?;
            let Some(field_id) = header.field_id else {
                break;
            };
            let value = self.read_value(header.wire_type)?;
            fields.insert(
                field_id,
                FieldValue {
                    field_id,
                    wire_type: header.wire_type,
                    value,
                },
            );
        }
        self.codec.read_struct_end();
        Ok(WireValue::Struct(fields))
    }

    fn read_list(&mut self, wire_type: WireType) -> Result<WireValue, DecodeError> {
        let header = if wire_type == WireType::Set {
            self.codec.read_set_begin()?
        } else {
            self.codec.read_list_begin()?
        };
        let mut items = self.reserve(header.size, &[header.element_type])?;
        for _ in 0..header.size {
            items.push(self.read_value(header.element_type)?);
        }
        let element_type = header.element_type;
        Ok(if wire_type == WireType::Set {
            WireValue::Set {
                element_type,
                items,
            }
        } else {
            WireValue::List {
                element_type,
                items,
            }
        })
    }

    fn read_map(&mut self) -> Result<WireValue, DecodeError> {
        let header = self.codec.read_map_begin()?;
        let mut entries = self.reserve(header.size, &[header.key_type, header.value_type])?;
        for _ in 0..header.size {
            let key = self.read_value(header.key_type)?;
            let value = self.read_value(header.value_type)?;
            entries.push((key, value));
        }
        Ok(WireValue::Map {
            key_type: header.key_type,
            value_type: header.value_type,
            entries,
        })
    }
}
