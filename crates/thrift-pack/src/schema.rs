//! The capabilities a host value implements to take part in encode/decode.
//!
//! A structured value lists its fields for encode and builds itself from a
//! decoded [`WireValue`] for decode. Code generators are expected to emit
//! these impls; hand-written ones look like this:
//!
//! ```
//! use thrift_pack::{
//!     DecodeError, Field, StructReader, ThriftDecode, ThriftEncode, WireTyped, WireValue,
//! };
//!
//! struct Point {
//!     x: i32,
//!     label: Option<String>,
//! }
//!
//! impl WireTyped for Point {}
//!
//! impl ThriftEncode for Point {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![Field::new(1, &self.x), Field::new(2, &self.label)]
//!     }
//! }
//!
//! impl ThriftDecode for Point {
//!     fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
//!         let mut reader = StructReader::new(value)?;
//!         Ok(Point {
//!             x: reader.required(1)?,
//!             label: reader.optional(2)?,
//!         })
//!     }
//! }
//! ```

use crate::encoder::ThriftEncoder;
use crate::error::{DecodeError, EncodeError};
use crate::wire_type::WireType;
use crate::wire_value::WireValue;

/// Static wire type of a host type.
pub trait WireTyped {
    /// `None` marks a type with no Thrift representation. Structured values
    /// keep the default.
    fn wire_type() -> Option<WireType>
    where
        Self: Sized,
    {
        Some(WireType::Struct)
    }
}

/// Write side of a host value.
pub trait ThriftEncode: WireTyped {
    /// Ordered field descriptors of a structured value.
    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }

    /// Runs after [`fields`](Self::fields) and before anything of the
    /// structure is written.
    fn validate(&self) -> Result<(), EncodeError> {
        Ok(())
    }

    /// An absent value omits its whole field, header included.
    fn is_absent(&self) -> bool {
        false
    }

    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        encoder.write_struct(self)
    }
}

/// Read side of a host value.
pub trait ThriftDecode: WireTyped + Sized {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError>;

    /// Value to use when the field is not on the wire; `None` makes the
    /// field required.
    fn decode_absent() -> Option<Self> {
        None
    }
}

/// One `(field id, value)` pair of a structured value.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    pub id: Option<i16>,
    pub wire_type: Option<WireType>,
    pub type_name: &'static str,
    pub value: &'a dyn ThriftEncode,
}

impl<'a> Field<'a> {
    pub fn new<T: ThriftEncode>(id: i16, value: &'a T) -> Self {
        Self {
            id: Some(id),
            ..Self::unnumbered(value)
        }
    }

    /// A field without an id. Encoding it fails with
    /// [`EncodeError::MissingFieldIdentifier`].
    pub fn unnumbered<T: ThriftEncode>(value: &'a T) -> Self {
        Self {
            id: None,
            wire_type: T::wire_type(),
            type_name: std::any::type_name::<T>(),
            value,
        }
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("wire_type", &self.wire_type)
            .field("type_name", &self.type_name)
            .finish()
    }
}
