//! Type tag bytes.

/// One-byte type codes that prefix every encoded value.
///
/// The numeric values are protocol constants and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Nil = 42,
    Dictionary = 68,
    Int8 = 98,
    Float32 = 102,
    Int32 = 105,
    Int16 = 107,
    Int64 = 108,
    Boolean = 111,
    String = 115,
    ByteArray = 120,
    TypedArray = 121,
}

impl TypeTag {
    /// Every supported tag, in ascending wire order.
    pub const ALL: [Self; 11] = [
        Self::Nil,
        Self::Dictionary,
        Self::Int8,
        Self::Float32,
        Self::Int32,
        Self::Int16,
        Self::Int64,
        Self::Boolean,
        Self::String,
        Self::ByteArray,
        Self::TypedArray,
    ];

    /// Parses a tag from a raw byte.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            42 => Some(Self::Nil),
            68 => Some(Self::Dictionary),
            98 => Some(Self::Int8),
            102 => Some(Self::Float32),
            105 => Some(Self::Int32),
            107 => Some(Self::Int16),
            108 => Some(Self::Int64),
            111 => Some(Self::Boolean),
            115 => Some(Self::String),
            120 => Some(Self::ByteArray),
            121 => Some(Self::TypedArray),
            _ => None,
        }
    }

    /// Returns the raw wire value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Returns `true` if values of this type can key a dictionary.
    ///
    /// Composite types and nil have no stable identity as map keys.
    #[must_use]
    pub const fn is_key_type(self) -> bool {
        !matches!(self, Self::Nil | Self::Dictionary | Self::TypedArray)
    }
}
