//! Protocol-agnostic decoded value tree.
//!
//! Scalars keep the Standard protocol payload (big-endian, no length prefix)
//! whichever protocol they were read from, so two trees decoded from the
//! Standard and Compact encodings of one value compare equal.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::error::DecodeError;
use crate::wire_type::WireType;

/// A decoded struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub field_id: i16,
    pub wire_type: WireType,
    pub value: WireValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// Canonical payload of a bool, byte, integer, double or string/binary.
    Scalar(Vec<u8>),
    /// Fields keyed by id. A repeated id keeps the last occurrence.
    Struct(BTreeMap<i16, FieldValue>),
    List {
        element_type: WireType,
        items: Vec<WireValue>,
    },
    Set {
        element_type: WireType,
        items: Vec<WireValue>,
    },
    /// Entries in wire order.
    Map {
        key_type: WireType,
        value_type: WireType,
        entries: Vec<(WireValue, WireValue)>,
    },
    /// Payload of a `stop` or `void` typed value: nothing.
    FieldStop,
}

impl WireValue {
    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::Scalar(_) => "scalar",
            WireValue::Struct(_) => "struct",
            WireValue::List { .. } => "list",
            WireValue::Set { .. } => "set",
            WireValue::Map { .. } => "map",
            WireValue::FieldStop => "field stop",
        }
    }

    /// Looks up a struct field.
    pub fn field(&self, field_id: i16) -> Option<&FieldValue> {
        match self {
            WireValue::Struct(fields) => fields.get(&field_id),
            _ => None,
        }
    }

    // ---------------------------------------------------------------- scalars

    fn scalar<const N: usize>(&self, expected: &'static str) -> Result<[u8; N], DecodeError> {
        let mismatch = DecodeError::UnexpectedValue {
            expected,
            found: self.kind(),
        };
        match self {
            WireValue::Scalar(bytes) => <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| mismatch),
            _ => Err(mismatch),
        }
    }

    /// `true` only for the byte 1.
    pub fn as_bool(&self) -> Result<bool, DecodeError> {
        Ok(self.scalar::<1>("bool")?[0] == 1)
    }

    pub fn as_byte(&self) -> Result<u8, DecodeError> {
        Ok(self.scalar::<1>("byte")?[0])
    }

    pub fn as_i16(&self) -> Result<i16, DecodeError> {
        Ok(i16::from_be_bytes(self.scalar("i16")?))
    }

    pub fn as_i32(&self) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.scalar("i32")?))
    }

    pub fn as_i64(&self) -> Result<i64, DecodeError> {
        Ok(i64::from_be_bytes(self.scalar("i64")?))
    }

    pub fn as_double(&self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(u64::from_be_bytes(self.scalar("double")?)))
    }

    pub fn as_bytes(&self) -> Result<&[u8], DecodeError> {
        match self {
            WireValue::Scalar(bytes) => Ok(bytes),
            other => Err(DecodeError::UnexpectedValue {
                expected: "string",
                found: other.kind(),
            }),
        }
    }

    pub fn as_str(&self) -> Result<&str, DecodeError> {
        let bytes = self.as_bytes()?;
        std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8(bytes.to_vec()))
    }

    // ---------------------------------------------------------------- json

    /// Renders the tree as JSON for diagnostics. `wire_type` is the type the
    /// value was decoded as; it only matters for scalars.
    pub fn to_json(&self, wire_type: WireType) -> Value {
        match self {
            WireValue::Scalar(bytes) => scalar_to_json(wire_type, bytes),
            WireValue::Struct(fields) => {
                let mut object = Map::new();
                for (id, field) in fields {
                    object.insert(id.to_string(), field.value.to_json(field.wire_type));
                }
                Value::Object(object)
            }
            WireValue::List {
                element_type,
                items,
            }
            | WireValue::Set {
                element_type,
                items,
            } => Value::Array(items.iter().map(|v| v.to_json(*element_type)).collect()),
            WireValue::Map {
                key_type,
                value_type,
                entries,
            } => Value::Array(
                entries
                    .iter()
                    .map(|(k, v)| Value::Array(vec![k.to_json(*key_type), v.to_json(*value_type)]))
                    .collect(),
            ),
            WireValue::FieldStop => Value::Null,
        }
    }
}

fn bytes_to_json(bytes: &[u8]) -> Value {
    match std::str::from_utf8(bytes) {
        Ok(text) => Value::String(text.to_owned()),
        Err(_) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

fn scalar_to_json(wire_type: WireType, bytes: &[u8]) -> Value {
    match (wire_type, bytes.len()) {
        (WireType::Bool, 1) => Value::Bool(bytes[0] == 1),
        (WireType::Byte, 1) => Value::from(bytes[0]),
        (WireType::I16, 2) => Value::from(i16::from_be_bytes([bytes[0], bytes[1]])),
        (WireType::I32, 4) => {
            Value::from(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        }
        (WireType::I64, 8) | (WireType::Double, 8) => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            if wire_type == WireType::I64 {
                Value::from(i64::from_be_bytes(raw))
            } else {
                Number::from_f64(f64::from_be_bytes(raw))
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        _ => bytes_to_json(bytes),
    }
}
