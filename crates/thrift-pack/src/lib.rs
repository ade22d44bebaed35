//! Apache Thrift wire codecs: Standard Binary and Compact protocols.
//!
//! Values take part through three small traits ([`WireTyped`],
//! [`ThriftEncode`], [`ThriftDecode`]). The [`ThriftEncoder`] walks a
//! value's ordered fields and drives the protocol's [`WireCodec`]; the
//! [`ThriftDecoder`] reads a message into a protocol-agnostic [`WireValue`]
//! tree and builds the target type from it.
//!
//! ```
//! use thrift_pack::{decode, encode, Protocol};
//!
//! let bytes = encode(Protocol::Compact, &vec![1i32, -1]).unwrap();
//! assert_eq!(bytes, vec![0x25, 0x02, 0x01]);
//! assert_eq!(decode::<Vec<i32>>(Protocol::Compact, &bytes).unwrap(), vec![1, -1]);
//! ```

mod binary;
mod codec;
mod compact;
mod config;
mod decoder;
mod encoder;
mod error;
mod impls;
mod preencoded;
mod schema;
mod struct_reader;
mod wire_type;
mod wire_value;

pub mod varint;

pub use binary::BinaryCodec;
pub use codec::{new_reader, new_writer, FieldHeader, ListHeader, MapHeader, WireCodec};
pub use compact::CompactCodec;
pub use config::{DecoderConfig, Protocol};
pub use decoder::ThriftDecoder;
pub use encoder::ThriftEncoder;
pub use error::{DecodeError, EncodeError};
pub use impls::Binary;
pub use preencoded::PreencodedSlot;
pub use schema::{Field, ThriftDecode, ThriftEncode, WireTyped};
pub use struct_reader::StructReader;
pub use wire_type::WireType;
pub use wire_value::{FieldValue, WireValue};

/// Encodes `value` with a fresh [`ThriftEncoder`].
pub fn encode<T: ThriftEncode>(protocol: Protocol, value: &T) -> Result<Vec<u8>, EncodeError> {
    ThriftEncoder::new(protocol).encode(value)
}

/// Decodes a `T` with a default-configured [`ThriftDecoder`].
pub fn decode<T: ThriftDecode>(protocol: Protocol, bytes: &[u8]) -> Result<T, DecodeError> {
    ThriftDecoder::new(protocol).decode(bytes)
}
