//! Decoded value types.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::tag::TypeTag;

/// A decoded value: one variant per wire type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Bool(bool),
    /// Raw string bytes; the protocol does not guarantee UTF-8.
    String(Vec<u8>),
    ByteArray(Vec<i8>),
    Dictionary(Dictionary),
    Array(TypedArray),
}

impl Value {
    /// Returns the wire tag this value decodes from.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        match self {
            Self::Nil => TypeTag::Nil,
            Self::Int8(_) => TypeTag::Int8,
            Self::Int16(_) => TypeTag::Int16,
            Self::Int32(_) => TypeTag::Int32,
            Self::Int64(_) => TypeTag::Int64,
            Self::Float32(_) => TypeTag::Float32,
            Self::Bool(_) => TypeTag::Boolean,
            Self::String(_) => TypeTag::String,
            Self::ByteArray(_) => TypeTag::ByteArray,
            Self::Dictionary(_) => TypeTag::Dictionary,
            Self::Array(_) => TypeTag::TypedArray,
        }
    }
}

impl From<DictKey> for Value {
    fn from(key: DictKey) -> Self {
        match key {
            DictKey::Int8(v) => Self::Int8(v),
            DictKey::Int16(v) => Self::Int16(v),
            DictKey::Int32(v) => Self::Int32(v),
            DictKey::Int64(v) => Self::Int64(v),
            DictKey::Float32(v) => Self::Float32(v),
            DictKey::Bool(v) => Self::Bool(v),
            DictKey::String(v) => Self::String(v),
            DictKey::ByteArray(v) => Self::ByteArray(v),
        }
    }
}

/// A homogeneous array; the element tag is read once for the whole array.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Bool(Vec<bool>),
    String(Vec<Vec<u8>>),
    /// A single byte array standing in for the whole element list.
    Bytes(Vec<i8>),
    /// Arrays of arrays; each sub-array carries its own element tag.
    Array(Vec<TypedArray>),
}

impl TypedArray {
    /// Returns the element tag of this array.
    #[must_use]
    pub const fn element_tag(&self) -> TypeTag {
        match self {
            Self::Int16(_) => TypeTag::Int16,
            Self::Int32(_) => TypeTag::Int32,
            Self::Int64(_) => TypeTag::Int64,
            Self::Float32(_) => TypeTag::Float32,
            Self::Bool(_) => TypeTag::Boolean,
            Self::String(_) => TypeTag::String,
            Self::Bytes(_) => TypeTag::ByteArray,
            Self::Array(_) => TypeTag::TypedArray,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::String(v) => v.len(),
            Self::Bytes(v) => v.len(),
            Self::Array(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A dictionary with fixed key and value tags.
///
/// Tags are kept raw: an empty dictionary never validates them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    pub key_tag: u8,
    pub value_tag: u8,
    pub entries: HashMap<DictKey, Value>,
}

impl Dictionary {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &DictKey) -> Option<&Value> {
        self.entries.get(key)
    }
}

/// The subset of values usable as dictionary keys.
///
/// `Float32` keys compare and hash by bit pattern, so `NaN` is a valid,
/// self-equal key and `0.0` and `-0.0` are distinct.
#[derive(Debug, Clone)]
pub enum DictKey {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Bool(bool),
    String(Vec<u8>),
    ByteArray(Vec<i8>),
}

impl DictKey {
    /// Converts a decoded value into a key, if its type allows it.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int8(v) => Some(Self::Int8(v)),
            Value::Int16(v) => Some(Self::Int16(v)),
            Value::Int32(v) => Some(Self::Int32(v)),
            Value::Int64(v) => Some(Self::Int64(v)),
            Value::Float32(v) => Some(Self::Float32(v)),
            Value::Bool(v) => Some(Self::Bool(v)),
            Value::String(v) => Some(Self::String(v)),
            Value::ByteArray(v) => Some(Self::ByteArray(v)),
            Value::Nil | Value::Dictionary(_) | Value::Array(_) => None,
        }
    }
}

impl PartialEq for DictKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int8(a), Self::Int8(b)) => a == b,
            (Self::Int16(a), Self::Int16(b)) => a == b,
            (Self::Int32(a), Self::Int32(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::Float32(a), Self::Float32(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::ByteArray(a), Self::ByteArray(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for DictKey {}

impl Hash for DictKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Int8(v) => v.hash(state),
            Self::Int16(v) => v.hash(state),
            Self::Int32(v) => v.hash(state),
            Self::Int64(v) => v.hash(state),
            Self::Float32(v) => v.to_bits().hash(state),
            Self::Bool(v) => v.hash(state),
            Self::String(v) => v.hash(state),
            Self::ByteArray(v) => v.hash(state),
        }
    }
}

/// Printable form used when keys are flattened into text.
impl fmt::Display for DictKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{}", String::from_utf8_lossy(v)),
            Self::ByteArray(v) => {
                write!(f, "[")?;
                for (i, byte) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{byte}")?;
                }
                write!(f, "]")
            }
        }
    }
}
