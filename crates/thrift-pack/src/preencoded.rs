//! Field values that may already be encoded.

use crate::encoder::ThriftEncoder;
use crate::error::{DecodeError, EncodeError};
use crate::schema::{ThriftDecode, ThriftEncode, WireTyped};
use crate::wire_type::WireType;
use crate::wire_value::WireValue;

/// Either bytes already encoded in the target protocol or a value to encode.
///
/// `Raw` bytes are spliced in exactly where the encoded `T` would go, right
/// after the field header, with no length prefix. The reported wire type is
/// always `T`'s. `Raw` and an equivalently encoded `Value` compare unequal.
///
/// Decoding always yields `Value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PreencodedSlot<T> {
    Raw(Vec<u8>),
    Value(T),
}

impl<T> PreencodedSlot<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            PreencodedSlot::Value(value) => Some(value),
            PreencodedSlot::Raw(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            PreencodedSlot::Value(value) => Some(value),
            PreencodedSlot::Raw(_) => None,
        }
    }
}

impl<T> From<T> for PreencodedSlot<T> {
    fn from(value: T) -> Self {
        PreencodedSlot::Value(value)
    }
}

impl<T: WireTyped> WireTyped for PreencodedSlot<T> {
    fn wire_type() -> Option<WireType> {
        T::wire_type()
    }
}

impl<T: ThriftEncode> ThriftEncode for PreencodedSlot<T> {
    fn is_absent(&self) -> bool {
        match self {
            PreencodedSlot::Raw(_) => false,
            PreencodedSlot::Value(value) => value.is_absent(),
        }
    }

    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        match self {
            PreencodedSlot::Raw(bytes) => encoder.write_raw(bytes),
            PreencodedSlot::Value(value) => value.encode(encoder),
        }
    }
}

impl<T: ThriftDecode> ThriftDecode for PreencodedSlot<T> {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        T::decode_wire(value).map(PreencodedSlot::Value)
    }

    fn decode_absent() -> Option<Self> {
        T::decode_absent().map(PreencodedSlot::Value)
    }
}
