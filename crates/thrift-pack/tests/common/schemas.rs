use std::collections::{BTreeMap, BTreeSet};

use thrift_pack::{
    Binary, DecodeError, EncodeError, Field, PreencodedSlot, StructReader, ThriftDecode,
    ThriftEncode, ThriftEncoder, WireType, WireTyped, WireValue,
};

// ---------------------------------------------------------------- Foundation

#[derive(Debug, Clone, PartialEq)]
pub struct Foundation {
    pub flag: bool,
    pub ratio: f64,
    pub small: i16,
    pub medium: i32,
    pub large: i64,
    pub text: String,
}

impl WireTyped for Foundation {}

impl ThriftEncode for Foundation {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(1, &self.flag),
            Field::new(2, &self.ratio),
            Field::new(3, &self.small),
            Field::new(4, &self.medium),
            Field::new(5, &self.large),
            Field::new(6, &self.text),
        ]
    }
}

impl ThriftDecode for Foundation {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(Foundation {
            flag: reader.required(1)?,
            ratio: reader.required(2)?,
            small: reader.required(3)?,
            medium: reader.required(4)?,
            large: reader.required(5)?,
            text: reader.required(6)?,
        })
    }
}

pub fn foundation() -> Foundation {
    Foundation {
        flag: false,
        ratio: 1.234,
        small: 128,
        medium: 23,
        large: 100293,
        text: "some string".to_string(),
    }
}

// ---------------------------------------------------------------- OptionalStruct

#[derive(Debug, Clone, PartialEq)]
pub struct OptionalStruct {
    pub small: Option<i16>,
    pub flag: bool,
}

impl WireTyped for OptionalStruct {}

impl ThriftEncode for OptionalStruct {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.small), Field::new(2, &self.flag)]
    }
}

impl ThriftDecode for OptionalStruct {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(OptionalStruct {
            small: reader.optional(1)?,
            flag: reader.required(2)?,
        })
    }
}

// ---------------------------------------------------------------- Subobject

#[derive(Debug, Clone, PartialEq)]
pub struct Subobject {
    pub inner: Option<OptionalStruct>,
    pub small: i16,
}

impl WireTyped for Subobject {}

impl ThriftEncode for Subobject {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.inner), Field::new(2, &self.small)]
    }
}

impl ThriftDecode for Subobject {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(Subobject {
            inner: reader.optional(1)?,
            small: reader.required(2)?,
        })
    }
}

// ---------------------------------------------------------------- Collections

#[derive(Debug, Clone, PartialEq)]
pub struct Collections {
    pub doubles: Vec<f64>,
    pub names: BTreeMap<String, String>,
    pub ids: BTreeSet<i32>,
}

impl WireTyped for Collections {}

impl ThriftEncode for Collections {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(1, &self.doubles),
            Field::new(2, &self.names),
            Field::new(3, &self.ids),
        ]
    }
}

impl ThriftDecode for Collections {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(Collections {
            doubles: reader.required(1)?,
            names: reader.required(2)?,
            ids: reader.required(3)?,
        })
    }
}

pub fn collections() -> Collections {
    Collections {
        doubles: vec![1.1, 2.2],
        names: BTreeMap::from([("a".to_string(), "asdf".to_string())]),
        ids: BTreeSet::from([1]),
    }
}

// ---------------------------------------------------------------- Letter

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letter {
    Aaa = 1,
    Bbb = 2,
}

impl WireTyped for Letter {
    fn wire_type() -> Option<WireType> {
        Some(WireType::I32)
    }
}

impl ThriftEncode for Letter {
    fn encode(&self, encoder: &mut ThriftEncoder) -> Result<(), EncodeError> {
        encoder.write_i32(*self as i32)
    }
}

impl ThriftDecode for Letter {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        match value.as_i32()? {
            1 => Ok(Letter::Aaa),
            2 => Ok(Letter::Bbb),
            other => Err(DecodeError::InvalidEnumValue(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetterHolder {
    pub letter: Letter,
}

impl WireTyped for LetterHolder {}

impl ThriftEncode for LetterHolder {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.letter)]
    }
}

impl ThriftDecode for LetterHolder {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(LetterHolder {
            letter: reader.required(1)?,
        })
    }
}

// ---------------------------------------------------------------- DataStruct

#[derive(Debug, Clone, PartialEq)]
pub struct DataStruct {
    pub data: Binary,
    pub byte: u8,
}

impl WireTyped for DataStruct {}

impl ThriftEncode for DataStruct {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.data), Field::new(2, &self.byte)]
    }
}

impl ThriftDecode for DataStruct {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(DataStruct {
            data: reader.required(1)?,
            byte: reader.required(2)?,
        })
    }
}

// ---------------------------------------------------------------- evolution

/// A later revision of [`OptionalStruct`] with two added fields.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalStructV2 {
    pub small: Option<i16>,
    pub flag: bool,
    pub tags: Vec<BTreeMap<String, i64>>,
    pub nested: Option<Subobject>,
}

impl WireTyped for OptionalStructV2 {}

impl ThriftEncode for OptionalStructV2 {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(1, &self.small),
            Field::new(2, &self.flag),
            Field::new(7, &self.tags),
            Field::new(40, &self.nested),
        ]
    }
}

/// Field 1 declared as a string where [`OptionalStruct`] has an i16.
#[derive(Debug, Clone, PartialEq)]
pub struct Retyped {
    pub small: String,
    pub flag: bool,
}

impl WireTyped for Retyped {}

impl ThriftEncode for Retyped {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.small), Field::new(2, &self.flag)]
    }
}

/// Known fields at ids 2 and 30, so the bool needs a long-form header.
#[derive(Debug, Clone, PartialEq)]
pub struct Relocated {
    pub small: Option<i16>,
    pub flag: bool,
}

impl WireTyped for Relocated {}

impl ThriftEncode for Relocated {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(2, &self.small), Field::new(30, &self.flag)]
    }
}

impl ThriftDecode for Relocated {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(Relocated {
            small: reader.optional(2)?,
            flag: reader.required(30)?,
        })
    }
}

/// [`Relocated`] with a list at id 1 that older readers do not know.
#[derive(Debug, Clone, PartialEq)]
pub struct RelocatedV2 {
    pub extra: Vec<i64>,
    pub small: Option<i16>,
    pub flag: bool,
}

impl WireTyped for RelocatedV2 {}

impl ThriftEncode for RelocatedV2 {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(1, &self.extra),
            Field::new(2, &self.small),
            Field::new(30, &self.flag),
        ]
    }
}

// ---------------------------------------------------------------- unions

#[derive(Debug, Clone, PartialEq)]
pub struct UnionClassA {
    pub some_string: String,
}

impl WireTyped for UnionClassA {}

impl ThriftEncode for UnionClassA {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.some_string)]
    }
}

impl ThriftDecode for UnionClassA {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(UnionClassA {
            some_string: reader.required(1)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionClassB {
    pub some_int: i64,
}

impl WireTyped for UnionClassB {}

impl ThriftEncode for UnionClassB {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.some_int)]
    }
}

impl ThriftDecode for UnionClassB {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(UnionClassB {
            some_int: reader.required(1)?,
        })
    }
}

/// A union: a struct with exactly one present field.
#[derive(Debug, Clone, PartialEq)]
pub enum SomeUnion {
    A(UnionClassA),
    B(UnionClassB),
}

impl WireTyped for SomeUnion {}

impl ThriftEncode for SomeUnion {
    fn fields(&self) -> Vec<Field<'_>> {
        match self {
            SomeUnion::A(a) => vec![Field::new(1, a)],
            SomeUnion::B(b) => vec![Field::new(2, b)],
        }
    }
}

impl ThriftDecode for SomeUnion {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        if let Some(a) = reader.optional(1)? {
            return Ok(SomeUnion::A(a));
        }
        match reader.optional(2)? {
            Some(b) => Ok(SomeUnion::B(b)),
            None => Err(DecodeError::UnexpectedValue {
                expected: "one union member",
                found: "none",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionStruct {
    pub some_union: SomeUnion,
}

impl WireTyped for UnionStruct {}

impl ThriftEncode for UnionStruct {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.some_union)]
    }
}

impl ThriftDecode for UnionStruct {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(UnionStruct {
            some_union: reader.required(1)?,
        })
    }
}

pub fn union_a() -> UnionStruct {
    UnionStruct {
        some_union: SomeUnion::A(UnionClassA {
            some_string: "string".to_string(),
        }),
    }
}

pub fn union_b() -> UnionStruct {
    UnionStruct {
        some_union: SomeUnion::B(UnionClassB { some_int: 123 }),
    }
}

// ---------------------------------------------------------------- recursion

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: i32,
    pub next: Option<Box<Node>>,
}

impl WireTyped for Node {}

impl ThriftEncode for Node {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.value), Field::new(2, &self.next)]
    }
}

impl ThriftDecode for Node {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(Node {
            value: reader.required(1)?,
            next: reader.optional(2)?,
        })
    }
}

pub fn chain(len: i32) -> Node {
    let mut node = Node {
        value: len,
        next: None,
    };
    for value in (1..len).rev() {
        node = Node {
            value,
            next: Some(Box::new(node)),
        };
    }
    node
}

// ---------------------------------------------------------------- misbehaving schemas

#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub count: i32,
}

impl WireTyped for Validated {}

impl ThriftEncode for Validated {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.count)]
    }

    fn validate(&self) -> Result<(), EncodeError> {
        if self.count < 0 {
            return Err(EncodeError::ValidationFailure(format!(
                "count must not be negative, got {}",
                self.count
            )));
        }
        Ok(())
    }
}

pub struct Unnumbered {
    pub value: i32,
}

impl WireTyped for Unnumbered {}

impl ThriftEncode for Unnumbered {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::unnumbered(&self.value)]
    }
}

pub struct Wide {
    pub big: u64,
}

impl WireTyped for Wide {}

impl ThriftEncode for Wide {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.big)]
    }
}

// ---------------------------------------------------------------- preencoded

#[derive(Debug, Clone, PartialEq)]
pub struct Slotted {
    pub slot: PreencodedSlot<i16>,
}

impl WireTyped for Slotted {}

impl ThriftEncode for Slotted {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.slot)]
    }
}

impl ThriftDecode for Slotted {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(Slotted {
            slot: reader.required(1)?,
        })
    }
}

/// [`Subobject`] with its nested struct possibly forwarded as bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub inner: PreencodedSlot<OptionalStruct>,
    pub small: i16,
}

impl WireTyped for Envelope {}

impl ThriftEncode for Envelope {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.inner), Field::new(2, &self.small)]
    }
}

impl ThriftDecode for Envelope {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(Envelope {
            inner: reader.required(1)?,
            small: reader.required(2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlagSlot {
    pub flag: PreencodedSlot<bool>,
    pub after: i16,
}

impl WireTyped for FlagSlot {}

impl ThriftEncode for FlagSlot {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(1, &self.flag), Field::new(2, &self.after)]
    }
}

impl ThriftDecode for FlagSlot {
    fn decode_wire(value: &WireValue) -> Result<Self, DecodeError> {
        let mut reader = StructReader::new(value)?;
        Ok(FlagSlot {
            flag: reader.required(1)?,
            after: reader.required(2)?,
        })
    }
}
