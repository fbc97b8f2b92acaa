//! Error types for value decoding.

use std::fmt;

use bytestream::ByteError;

/// Result type for value decoding.
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors that can occur while decoding a tagged value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A read ran past the end of the buffer.
    Bytes(ByteError),

    /// Type tag outside the supported set.
    UnsupportedType { tag: u8 },

    /// Typed-array element tag that arrays cannot carry.
    UnsupportedArrayElement { tag: u8 },

    /// Dictionary key tag with no stable map-key identity.
    UnsupportedKeyType { tag: u8 },

    /// Boolean byte other than 0 or 1.
    InvalidBoolean { value: u8 },

    /// Nesting deeper than the configured limit.
    DepthExceeded { limit: usize },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(err) => write!(f, "{err}"),
            Self::UnsupportedType { tag } => write!(f, "unsupported type {tag}"),
            Self::UnsupportedArrayElement { tag } => {
                write!(f, "unsupported array element type {tag}")
            }
            Self::UnsupportedKeyType { tag } => {
                write!(f, "unsupported dictionary key type {tag}")
            }
            Self::InvalidBoolean { value } => {
                write!(f, "invalid value for boolean of {value}")
            }
            Self::DepthExceeded { limit } => {
                write!(f, "value nesting exceeds depth limit {limit}")
            }
        }
    }
}

impl std::error::Error for ValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bytes(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ByteError> for ValueError {
    fn from(err: ByteError) -> Self {
        Self::Bytes(err)
    }
}
