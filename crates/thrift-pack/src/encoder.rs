//! Generic encoder: walks a value's fields and drives the protocol codec.

use crate::codec::{new_writer, WireCodec};
use crate::config::Protocol;
use crate::error::EncodeError;
use crate::schema::{Field, ThriftEncode};
use crate::wire_type::WireType;
use crate::wire_value::WireValue;

/// Thrift encoder for one protocol.
///
/// Each [`encode`](Self::encode) call writes into a fresh buffer. The
/// `write_*` methods are the building blocks used by
/// [`ThriftEncode::encode`] impls and fail with
/// [`EncodeError::UninitializedBuffer`] outside of an encode call.
pub struct ThriftEncoder {
    protocol: Protocol,
    codec: Option<Box<dyn WireCodec>>,
}

impl Default for ThriftEncoder {
    fn default() -> Self {
        Self::new(Protocol::default())
    }
}

impl ThriftEncoder {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            codec: None,
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Encodes `value` as the root of a message.
    ///
    /// A structured root ends with field-stop; any other root is written
    /// bare.
    pub fn encode<T: ThriftEncode>(&mut self, value: &T) -> Result<Vec<u8>, EncodeError> {
        if T::wire_type().is_none() {
            return Err(EncodeError::UnencodableType(std::any::type_name::<T>()));
        }
        self.run(|encoder| value.encode(encoder))
    }

    /// Writes an untyped tree as a root of type `wire_type`, e.g. to
    /// re-emit a decoded message under another protocol.
    pub fn encode_wire(
        &mut self,
        wire_type: WireType,
        value: &WireValue,
    ) -> Result<Vec<u8>, EncodeError> {
        self.run(|encoder| encoder.write_wire(wire_type, value))
    }

    fn run(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<(), EncodeError>,
    ) -> Result<Vec<u8>, EncodeError> {
        self.codec = Some(new_writer(self.protocol));
        let result = body(self);
        let codec = self.codec.take().ok_or(EncodeError::UninitializedBuffer)?;
        result?;
        let bytes = codec.into_bytes();
        tracing::trace!(protocol = ?self.protocol, bytes = bytes.len(), "encoded thrift message");
        Ok(bytes)
    }

    fn codec_mut(&mut self) -> Result<&mut (dyn WireCodec + 'static), EncodeError> {
        match self.codec.as_deref_mut() {
            Some(codec) => Ok(codec),
            None => Err(EncodeError::UninitializedBuffer),
        }
    }

    // ---------------------------------------------------------------- scalars

    pub fn write_bool(&mut self, value: bool) -> Result<(), EncodeError> {
        self.codec_mut()?.write_bool(value);
        Ok(())
    }

    pub fn write_byte(&mut self, value: u8) -> Result<(), EncodeError> {
        self.codec_mut()?.write_byte(value);
        Ok(())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<(), EncodeError> {
        self.codec_mut()?.write_i16(value);
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), EncodeError> {
        self.codec_mut()?.write_i32(value);
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), EncodeError> {
        self.codec_mut()?.write_i64(value);
        Ok(())
    }

    pub fn write_double(&mut self, value: f64) -> Result<(), EncodeError> {
        self.codec_mut()?.write_double(value);
        Ok(())
    }

    pub fn write_string(&mut self, value: &str) -> Result<(), EncodeError> {
        self.codec_mut()?.write_string(value);
        Ok(())
    }

    pub fn write_binary(&mut self, value: &[u8]) -> Result<(), EncodeError> {
        self.codec_mut()?.write_binary(value);
        Ok(())
    }

    /// Splices already-encoded bytes in place of a value.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.codec_mut()?.write_raw(bytes);
        Ok(())
    }

    // ---------------------------------------------------------------- structs

    /// Writes `value`'s fields in the order it lists them, then field-stop.
    pub fn write_struct<T: ThriftEncode + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let fields = value.fields();
        value.validate()?;
        self.codec_mut()?.write_struct_begin();
        for field in &fields {
            self.write_field(field)?;
        }
        let codec = self.codec_mut()?;
        codec.write_field_stop();
        codec.write_struct_end();
        Ok(())
    }

    fn write_field(&mut self, field: &Field<'_>) -> Result<(), EncodeError> {
        let id = field.id.ok_or(EncodeError::MissingFieldIdentifier)?;
        if field.value.is_absent() {
            return Ok(());
        }
        let wire_type = field
            .wire_type
            .ok_or(EncodeError::UnencodableType(field.type_name))?;
        self.codec_mut()?.write_field_begin(wire_type, id);
        field.value.encode(self)
    }

    // ---------------------------------------------------------------- collections

    pub fn write_list<'a, T, I>(&mut self, items: I) -> Result<(), EncodeError>
    where
        T: ThriftEncode + 'a,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let element_type = element_wire_type::<T>()?;
        self.codec_mut()?.write_list_begin(element_type, items.len());
        for item in items {
            self.write_element(item)?;
        }
        Ok(())
    }

    pub fn write_set<'a, T, I>(&mut self, items: I) -> Result<(), EncodeError>
    where
        T: ThriftEncode + 'a,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let element_type = element_wire_type::<T>()?;
        self.codec_mut()?.write_set_begin(element_type, items.len());
        for item in items {
            self.write_element(item)?;
        }
        Ok(())
    }

    pub fn write_map<'a, K, V, I>(&mut self, entries: I) -> Result<(), EncodeError>
    where
        K: ThriftEncode + 'a,
        V: ThriftEncode + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
        I::IntoIter: ExactSizeIterator,
    {
        let entries = entries.into_iter();
        let key_type = element_wire_type::<K>()?;
        let value_type = element_wire_type::<V>()?;
        self.codec_mut()?
            .write_map_begin(key_type, value_type, entries.len());
        for (key, value) in entries {
            self.write_element(key)?;
            self.write_element(value)?;
        }
        Ok(())
    }

    fn write_element<T: ThriftEncode + ?Sized>(&mut self, item: &T) -> Result<(), EncodeError> {
        if item.is_absent() {
            return Err(EncodeError::AbsentElement);
        }
        item.encode(self)
    }

    // ---------------------------------------------------------------- untyped

    /// Writes a decoded tree under `wire_type`, using the wire types the tree
    /// recorded for its fields and elements.
    pub fn write_wire(&mut self, wire_type: WireType, value: &WireValue) -> Result<(), EncodeError> {
        let mismatch = EncodeError::MismatchedWireValue(wire_type);
        match (wire_type, value) {
            (WireType::Stop | WireType::Void, WireValue::FieldStop) => Ok(()),
            (WireType::Bool, WireValue::Scalar(_)) => {
                self.write_bool(value.as_bool().map_err(|_| mismatch)?)
            }
            (WireType::Byte, WireValue::Scalar(_)) => {
                self.write_byte(value.as_byte().map_err(|_| mismatch)?)
            }
            (WireType::I16, WireValue::Scalar(_)) => {
                self.write_i16(value.as_i16().map_err(|_| mismatch)?)
            }
            (WireType::I32, WireValue::Scalar(_)) => {
                self.write_i32(value.as_i32().map_err(|_| mismatch)?)
            }
            (WireType::I64, WireValue::Scalar(_)) => {
                self.write_i64(value.as_i64().map_err(|_| mismatch)?)
            }
            (WireType::Double, WireValue::Scalar(_)) => {
                self.write_double(value.as_double().map_err(|_| mismatch)?)
            }
            (WireType::StringOrBinary, WireValue::Scalar(bytes)) => self.write_binary(bytes),
            (WireType::Struct, WireValue::Struct(fields)) => {
                self.codec_mut()?.write_struct_begin();
                for field in fields.values() {
                    self.codec_mut()?
                        .write_field_begin(field.wire_type, field.field_id);
                    self.write_wire(field.wire_type, &field.value)?;
                }
                let codec = self.codec_mut()?;
                codec.write_field_stop();
                codec.write_struct_end();
                Ok(())
            }
            (
                WireType::List,
                WireValue::List {
                    element_type,
                    items,
                },
            ) => {
                self.codec_mut()?.write_list_begin(*element_type, items.len());
                for item in items {
                    self.write_wire(*element_type, item)?;
                }
                Ok(())
            }
            (
                WireType::Set,
                WireValue::Set {
                    element_type,
                    items,
                },
            ) => {
                self.codec_mut()?.write_set_begin(*element_type, items.len());
                for item in items {
                    self.write_wire(*element_type, item)?;
                }
                Ok(())
            }
            (
                WireType::Map,
                WireValue::Map {
                    key_type,
                    value_type,
                    entries,
                },
            ) => {
                self.codec_mut()?
                    .write_map_begin(*key_type, *value_type, entries.len());
                for (key, value) in entries {
                    self.write_wire(*key_type, key)?;
                    self.write_wire(*value_type, value)?;
                }
                Ok(())
            }
            _ => Err(mismatch),
        }
    }
}

fn element_wire_type<T: ThriftEncode>() -> Result<WireType, EncodeError> {
    T::wire_type().ok_or(EncodeError::UnencodableType(std::any::type_name::<T>()))
}
