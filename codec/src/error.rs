//! Error types for codec operations.

use std::fmt;

use wire::CommandType;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while interpreting commands and decoding messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Datagram framing error.
    Wire(wire::DecodeError),

    /// Value decoding error.
    Value(value::ValueError),

    /// A fixed-width field ran past the command body.
    Bytes(bytestream::ByteError),

    /// Conversion requested on a command of another type.
    UnexpectedCommandType { expected: CommandType, found: u8 },

    /// Message type above the plaintext range; the payload is encrypted.
    EncryptionNotSupported { message_type: u8 },

    /// Operation response debug message was neither nil nor a string.
    InvalidDebugMessage { found: value::TypeTag },
}

impl CodecError {
    /// Returns `true` if only the current command is lost.
    ///
    /// Framing errors invalidate the whole datagram; everything else is
    /// confined to the command that produced it.
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        !matches!(self, Self::Wire(_))
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::Value(e) => write!(f, "value error: {e}"),
            Self::Bytes(e) => write!(f, "message error: {e}"),
            Self::UnexpectedCommandType { expected, found } => {
                write!(
                    f,
                    "command can't be converted: expected {expected:?}, found type {found}"
                )
            }
            Self::EncryptionNotSupported { message_type } => {
                write!(f, "encryption not supported (message type {message_type})")
            }
            Self::InvalidDebugMessage { found } => {
                write!(f, "operation response debug message has type {found:?}")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Value(e) => Some(e),
            Self::Bytes(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<value::ValueError> for CodecError {
    fn from(err: value::ValueError) -> Self {
        Self::Value(err)
    }
}

impl From<bytestream::ByteError> for CodecError {
    fn from(err: bytestream::ByteError) -> Self {
        Self::Bytes(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_encryption() {
        let err = CodecError::EncryptionNotSupported { message_type: 131 };
        let msg = err.to_string();
        assert!(msg.contains("encryption not supported"));
        assert!(msg.contains("131"));
    }

    #[test]
    fn display_unexpected_command() {
        let err = CodecError::UnexpectedCommandType {
            expected: CommandType::SendReliable,
            found: 5,
        };
        assert!(err.to_string().contains("can't be converted"));
    }

    #[test]
    fn framing_errors_are_not_skippable() {
        let err = CodecError::from(wire::DecodeError::DatagramTooSmall {
            actual: 1,
            required: 12,
        });
        assert!(!err.is_skippable());
    }

    #[test]
    fn message_errors_are_skippable() {
        assert!(CodecError::EncryptionNotSupported { message_type: 200 }.is_skippable());
        assert!(CodecError::from(value::ValueError::InvalidBoolean { value: 3 }).is_skippable());
        assert!(CodecError::from(bytestream::ByteError::UnexpectedEof {
            requested: 1,
            available: 0
        })
        .is_skippable());
    }

    #[test]
    fn source_chains_to_inner_error() {
        let err = CodecError::from(value::ValueError::UnsupportedType { tag: 1 });
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "unsupported type 1");
    }
}
