//! Error types for datagram framing.

use std::fmt;

use bytestream::ByteError;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// High-level decode errors for datagram framing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Datagram is too small to contain the layer header.
    DatagramTooSmall { actual: usize, required: usize },

    /// A command header declared a length smaller than the header itself.
    InvalidCommandLength { command: usize, length: i32 },

    /// A command body runs past the end of the datagram.
    TruncatedCommand {
        command: usize,
        needed: usize,
        available: usize,
    },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A fixed-width header read ran past the buffer.
    Bytes(ByteError),
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    DatagramBytes,
    CommandCount,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DatagramTooSmall { actual, required } => {
                write!(
                    f,
                    "datagram too small: {actual} bytes, need at least {required}"
                )
            }
            Self::InvalidCommandLength { command, length } => {
                write!(f, "command {command} has invalid length {length}")
            }
            Self::TruncatedCommand {
                command,
                needed,
                available,
            } => {
                write!(
                    f,
                    "truncated packet: command {command} needs {needed} body bytes, {available} remaining"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::Bytes(err) => write!(f, "header read failed: {err}"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DatagramBytes => "datagram bytes",
            Self::CommandCount => "command count",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bytes(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ByteError> for DecodeError {
    fn from(err: ByteError) -> Self {
        Self::Bytes(err)
    }
}
