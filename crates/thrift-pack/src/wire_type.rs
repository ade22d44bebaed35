//! Thrift wire-type tags and their on-wire encodings.
//!
//! The Standard protocol uses the sparse byte values below; the Compact
//! protocol packs the same thirteen types into a dense nibble (0..=12).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::schema::WireTyped;

/// The thirteen Thrift wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WireType {
    Stop = 0,
    Void = 1,
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    /// UTF-8 text and raw byte blobs share this representation.
    StringOrBinary = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
}

impl WireType {
    pub const ALL: [WireType; 13] = [
        WireType::Stop,
        WireType::Void,
        WireType::Bool,
        WireType::Byte,
        WireType::Double,
        WireType::I16,
        WireType::I32,
        WireType::I64,
        WireType::StringOrBinary,
        WireType::Struct,
        WireType::Map,
        WireType::Set,
        WireType::List,
    ];

    /// Standard protocol tag byte.
    #[inline]
    pub fn to_standard_byte(self) -> u8 {
        self as u8
    }

    /// Parses a Standard protocol tag byte.
    pub fn from_standard_byte(byte: u8) -> Result<Self, DecodeError> {
        Ok(match byte {
            0 => WireType::Stop,
            1 => WireType::Void,
            2 => WireType::Bool,
            3 => WireType::Byte,
            4 => WireType::Double,
            6 => WireType::I16,
            8 => WireType::I32,
            10 => WireType::I64,
            11 => WireType::StringOrBinary,
            12 => WireType::Struct,
            13 => WireType::Map,
            14 => WireType::Set,
            15 => WireType::List,
            other => return Err(DecodeError::UnsupportedWireType(other)),
        })
    }

    /// Compact protocol nibble.
    ///
    /// `Void` and `Bool` double as the true/false markers of a boolean
    /// struct field.
    pub fn to_compact_nibble(self) -> u8 {
        match self {
            WireType::Stop => 0,
            WireType::Void => 1,
            WireType::Bool => 2,
            WireType::Byte => 3,
            WireType::I16 => 4,
            WireType::I32 => 5,
            WireType::I64 => 6,
            WireType::Double => 7,
            WireType::StringOrBinary => 8,
            WireType::List => 9,
            WireType::Set => 10,
            WireType::Map => 11,
            WireType::Struct => 12,
        }
    }

    /// Parses a Compact protocol nibble. Only the low four bits are looked at
    /// by callers; anything above 12 is rejected.
    pub fn from_compact_nibble(nibble: u8) -> Result<Self, DecodeError> {
        Ok(match nibble {
            0 => WireType::Stop,
            1 => WireType::Void,
            2 => WireType::Bool,
            3 => WireType::Byte,
            4 => WireType::I16,
            5 => WireType::I32,
            6 => WireType::I64,
            7 => WireType::Double,
            8 => WireType::StringOrBinary,
            9 => WireType::List,
            10 => WireType::Set,
            11 => WireType::Map,
            12 => WireType::Struct,
            other => return Err(DecodeError::UnsupportedWireType(other)),
        })
    }

    /// Wire type a host type is encoded as, or `None` when the type has no
    /// Thrift representation.
    pub fn infer<T: WireTyped>() -> Option<WireType> {
        T::wire_type()
    }

    pub fn name(self) -> &'static str {
        match self {
            WireType::Stop => "stop",
            WireType::Void => "void",
            WireType::Bool => "bool",
            WireType::Byte => "byte",
            WireType::Double => "double",
            WireType::I16 => "i16",
            WireType::I32 => "i32",
            WireType::I64 => "i64",
            WireType::StringOrBinary => "string",
            WireType::Struct => "struct",
            WireType::Map => "map",
            WireType::Set => "set",
            WireType::List => "list",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
