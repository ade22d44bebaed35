//! Value trait impls for host primitives and collections.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use crate::encoder::ThriftEncoder;
use crate::error::{DecodeError, EncodeError};
use crate::schema::{ThriftDecode, ThriftEncode, WireTyped};
use crate::wire_type::WireType;
use crate::wire_value::WireValue;

/// An owned byte blob, written as `string_or_binary`.
///
/// `Vec<u8>` is a list of bytes on the wire; wrap it in `Binary` to get the
/// length-prefixed blob form instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Binary(pub Vec<u8>);

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Binary(bytes)
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Binary(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Binary {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ---------------------------------------------------------------- scalars

macro_rules! impl_scalar {
    ($ty:ty, $wire_type:ident, $write:ident, $read:ident) => {
        impl WireTyped for $ty {
            fn wire_type() -> Option<WireType> {
                Some(WireType::$wire_type)
            }
        }

        impl ThriftEncode for $ty {
            fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
                encoder.$write(*self)
            }
        }

        impl ThriftDecode for $ty {
            fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
                value.$read()
            }
        }
    };
}

impl_scalar!(bool, Bool, write_bool, as_bool);
impl_scalar!(u8, Byte, write_byte, as_byte);
impl_scalar!(f64, Double, write_double, as_double);
impl_scalar!(i16, I16, write_i16, as_i16);
impl_scalar!(i32, I32, write_i32, as_i32);
impl_scalar!(i64, I64, write_i64, as_i64);

impl WireTyped for String {
    fn wire_type() -> Option<WireType> {
        Some(WireType::StringOrBinary)
    }
}

impl ThriftEncode for String {
    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        encoder.write_string(self)
    }
}

impl ThriftDecode for String {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        value.as_str().map(str::to_owned)
    }
}

impl WireTyped for Binary {
    fn wire_type() -> Option<WireType> {
        Some(WireType::StringOrBinary)
    }
}

impl ThriftEncode for Binary {
    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        encoder.write_binary(&self.0)
    }
}

impl ThriftDecode for Binary {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        Ok(Binary(value.as_bytes()?.to_vec()))
    }
}

// Host primitives with no wire type. They fail when actually written or
// read, carrying their name.
macro_rules! impl_unrepresentable {
    ($($ty:ty),* $(,)?) => {$(
        impl WireTyped for $ty {
            fn wire_type() -> Option<WireType> {
                None
            }
        }

        impl ThriftEncode for $ty {
            fn encode(&self, _encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
                Err(EncodeError::UnencodableType(stringify!($ty)))
            }
        }

        impl ThriftDecode for $ty {
            fn decode_wire(_value: &WireValue) -> Result<Self, DecodeError> {
                Err(DecodeError::UndecodableType(stringify!($ty)))
            }
        }
    )*};
}

impl_unrepresentable!(u16, u32, u64, i8, f32, char, usize, isize);

// ---------------------------------------------------------------- wrappers

impl<T: WireTyped> WireTyped for Option<T> {
    fn wire_type() -> Option<WireType> {
        T::wire_type()
    }
}

impl<T: ThriftEncode> ThriftEncode for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        match self {
            Some(value) => value.encode(encoder),
            None => Ok(()),
        }
    }
}

impl<T: ThriftDecode> ThriftDecode for Option<T> {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        T::decode_wire(value).map(Some)
    }

    fn decode_absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: WireTyped> WireTyped for Box<T> {
    fn wire_type() -> Option<WireType> {
        T::wire_type()
    }
}

impl<T: ThriftEncode> ThriftEncode for Box<T> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }

    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl<T: ThriftDecode> ThriftDecode for Box<T> {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        T::decode_wire(value).map(Box::new)
    }

    fn decode_absent() -> Option<Self> {
        T::decode_absent().map(Box::new)
    }
}

// ---------------------------------------------------------------- collections

fn collection_items(value: &WireValue, wire_type: WireType) -> Result<&[WireValue], DecodeError> {
    match value {
        WireValue::List { items, .. } if wire_type == WireType::List => Ok(items),
        WireValue::Set { items, .. } if wire_type == WireType::Set => Ok(items),
        other => Err(DecodeError::UnexpectedValue {
            expected: wire_type.name(),
            found: other.kind(),
        }),
    }
}

fn map_entries(value: &WireValue) -> Result<&[(WireValue, WireValue)], DecodeError> {
    match value {
        WireValue::Map { entries, .. } => Ok(entries),
        other => Err(DecodeError::UnexpectedValue {
            expected: "map",
            found: other.kind(),
        }),
    }
}

fn decode_entry<K: ThriftDecode, V: ThriftDecode>(
    (key, value): &(WireValue, WireValue),
) -> Result<(K, V), DecodeError> {
    Ok((K::decode_wire(key)?, V::decode_wire(value)?))
}

impl<T> WireTyped for Vec<T> {
    fn wire_type() -> Option<WireType> {
        Some(WireType::List)
    }
}

impl<T: ThriftEncode> ThriftEncode for Vec<T> {
    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        encoder.write_list(self.iter())
    }
}

impl<T: ThriftDecode> ThriftDecode for Vec<T> {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        collection_items(value, WireType::List)?.iter().map(T::decode_wire).collect()
    }
}

impl<T> WireTyped for BTreeSet<T> {
    fn wire_type() -> Option<WireType> {
        Some(WireType::Set)
    }
}

impl<T: ThriftEncode> ThriftEncode for BTreeSet<T> {
    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        encoder.write_set(self.iter())
    }
}

impl<T: ThriftDecode + Ord> ThriftDecode for BTreeSet<T> {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        collection_items(value, WireType::Set)?.iter().map(T::decode_wire).collect()
    }
}

impl<T, S> WireTyped for HashSet<T, S> {
    fn wire_type() -> Option<WireType> {
        Some(WireType::Set)
    }
}

impl<T: ThriftEncode, S> ThriftEncode for HashSet<T, S> {
    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        encoder.write_set(self.iter())
    }
}

impl<T, S> ThriftDecode for HashSet<T, S>
where
    T: ThriftDecode + Eq + Hash,
    S: std::hash::BuildHasher + Default,
{
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        collection_items(value, WireType::Set)?.iter().map(T::decode_wire).collect()
    }
}

impl<K, V> WireTyped for BTreeMap<K, V> {
    fn wire_type() -> Option<WireType> {
        Some(WireType::Map)
    }
}

impl<K: ThriftEncode, V: ThriftEncode> ThriftEncode for BTreeMap<K, V> {
    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        encoder.write_map(self.iter())
    }
}

impl<K: ThriftDecode + Ord, V: ThriftDecode> ThriftDecode for BTreeMap<K, V> {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        map_entries(value)?.iter().map(decode_entry).collect()
    }
}

impl<K, V, S> WireTyped for HashMap<K, V, S> {
    fn wire_type() -> Option<WireType> {
        Some(WireType::Map)
    }
}

impl<K: ThriftEncode, V: ThriftEncode, S> ThriftEncode for HashMap<K, V, S> {
    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        encoder.write_map(self.iter())
    }
}

impl<K, V, S> ThriftDecode for HashMap<K, V, S>
where
    K: ThriftDecode + Eq + Hash,
    V: ThriftDecode,
    S: std::hash::BuildHasher + Default,
{
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        map_entries(value)?.iter().map(decode_entry).collect()
    }
}
