//! Builds typed values from a decoded struct field by field.

use std::collections::BTreeMap;

use crate::error::DecodeError;
use crate::schema::ThriftDecode;
use crate::wire_value::{FieldValue, WireValue};

/// Field lookup over a decoded [`WireValue::Struct`].
///
/// A field whose wire type differs from the requested type's is not
/// coerced: it reads as absent. Fields never requested are dropped; both
/// cases are logged at debug level.
pub struct StructReader<'a> {
    fields: &'a BTreeMap<i16, FieldValue>,
    consumed: Vec<i16>,
}

impl<'a> StructReader<'a> {
    pub fn new(value: &'a WireValue) -> Result<Self, DecodeError> {
        match value {
            WireValue::Struct(fields) => Ok(Self {
                fields,
                consumed: Vec::with_capacity(fields.len()),
            }),
            other => Err(DecodeError::UnexpectedValue {
                expected: "struct",
                found: other.kind(),
            }),
        }
    }

    /// Reads field `id`, falling back to [`ThriftDecode::decode_absent`] and
    /// failing with [`DecodeError::MissingField`] when that has nothing.
    pub fn required<T: ThriftDecode>(&mut self, id: i16) -> Result<T, DecodeError> {
        let expected =
            T::wire_type().ok_or(DecodeError::UndecodableType(std::any::type_name::<T>()))?;
        self.consumed.push(id);
        if let Some(field) = self.fields.get(&id) {
            if field.wire_type == expected {
                return T::decode_wire(&field.value);
            }
            tracing::debug!(
                field_id = id,
                expected = %expected,
                found = %field.wire_type,
                "ignoring field with unexpected wire type"
            );
        }
        T::decode_absent().ok_or(DecodeError::MissingField(id))
    }

    pub fn optional<T: ThriftDecode>(&mut self, id: i16) -> Result<Option<T>, DecodeError> {
        self.required::<Option<T>>(id)
    }

    /// Ids present on the wire but not requested so far.
    pub fn unknown_fields(&self) -> impl Iterator<Item = &'a FieldValue> + '_ {
        self.fields
            .values()
            .filter(|field| !self.consumed.contains(&field.field_id))
    }
}

impl Drop for StructReader<'_> {
    fn drop(&mut self) {
        for field in self.unknown_fields() {
            tracing::debug!(
                field_id = field.field_id,
                wire_type = %field.wire_type,
                "skipping unknown field"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire_type::WireType;

    fn tree() -> WireValue {
        let field = |field_id, wire_type, value| {
            (
                field_id,
                FieldValue {
                    field_id,
                    wire_type,
                    value,
                },
            )
        };
        WireValue::Struct(BTreeMap::from([
            field(1, WireType::I16, WireValue::Scalar(vec![0, 12])),
            field(2, WireType::Bool, WireValue::Scalar(vec![1])),
            field(9, WireType::I32, WireValue::Scalar(vec![0, 0, 0, 9])),
        ]))
    }

    #[test]
    fn test_required_and_optional() {
        let tree = tree();
        let mut reader = StructReader::new(&tree).unwrap();
        assert_eq!(reader.required::<i16>(1), Ok(12));
        assert_eq!(reader.optional::<bool>(2), Ok(Some(true)));
        assert_eq!(reader.optional::<String>(3), Ok(None));
        assert_eq!(reader.required::<i64>(4), Err(DecodeError::MissingField(4)));
        let unknown: Vec<i16> = reader.unknown_fields().map(|f| f.field_id).collect();
        assert_eq!(unknown, vec![9]);
    }

    #[test]
    fn test_type_mismatch_reads_as_absent() {
        let tree = tree();
        let mut reader = StructReader::new(&tree).unwrap();
        assert_eq!(reader.optional::<i32>(1), Ok(None));
        assert_eq!(reader.required::<i64>(9), Err(DecodeError::MissingField(9)));
    }

    #[test]
    fn test_undecodable_field_type() {
        let tree = tree();
        let mut reader = StructReader::new(&tree).unwrap();
        assert_eq!(
            reader.required::<u64>(7),
            Err(DecodeError::UndecodableType("u64"))
        );
    }

    #[test]
    fn test_not_a_struct() {
        let value = WireValue::Scalar(vec![1]);
        assert!(matches!(
            StructReader::new(&value),
            Err(DecodeError::UnexpectedValue {
                expected: "struct",
                found: "scalar"
            })
        ));
    }
}
