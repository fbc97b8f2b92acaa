//! Reliable message headers.

use bytestream::ByteReader;
use value::{decode_tagged_value, Value, ValueLimits};
use wire::{Command, CommandType};

use crate::error::{CodecError, CodecResult};

/// Message type of an operation request.
pub const OPERATION_REQUEST: u8 = 2;
/// Alternate spelling of [`OPERATION_RESPONSE`] on the wire.
pub const OTHER_OPERATION_RESPONSE: u8 = 3;
/// Message type of an event.
pub const EVENT_DATA: u8 = 4;
/// Message type of an operation response.
pub const OPERATION_RESPONSE: u8 = 7;
/// Highest plaintext message type. Anything above is encrypted.
pub const MAX_PLAINTEXT_MESSAGE_TYPE: u8 = 128;

/// Type-specific part of a reliable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Request {
        operation_code: u8,
    },
    Response {
        operation_code: u8,
        return_code: u16,
        /// Raw bytes of the debug string, if one was sent.
        debug_message: Option<Vec<u8>>,
    },
    Event {
        event_code: u8,
    },
    /// Plaintext message type with no known fields.
    Other {
        message_type: u8,
    },
}

impl MessageBody {
    /// Short name of the message kind.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request",
            Self::Response { .. } => "response",
            Self::Event { .. } => "event",
            Self::Other { .. } => "other",
        }
    }

    /// Canonical message type byte.
    #[must_use]
    pub const fn message_type(&self) -> u8 {
        match self {
            Self::Request { .. } => OPERATION_REQUEST,
            Self::Response { .. } => OPERATION_RESPONSE,
            Self::Event { .. } => EVENT_DATA,
            Self::Other { message_type } => *message_type,
        }
    }

    /// Operation or event code, when the message kind has one.
    #[must_use]
    pub const fn code(&self) -> Option<u8> {
        match self {
            Self::Request { operation_code } | Self::Response { operation_code, .. } => {
                Some(*operation_code)
            }
            Self::Event { event_code } => Some(*event_code),
            Self::Other { .. } => None,
        }
    }
}

/// A decoded reliable message header with its raw parameter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReliableMessage<'a> {
    pub signature: u8,
    pub body: MessageBody,
    /// Declared number of parameters. Negative counts decode as none.
    pub parameter_count: i16,
    /// Encoded `(id, tag, value)` triples.
    pub parameters: &'a [u8],
}

impl<'a> ReliableMessage<'a> {
    /// Interprets a `SendReliable` command.
    ///
    /// `limits` bounds the debug string of operation responses.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EncryptionNotSupported`] for message types above
    /// [`MAX_PLAINTEXT_MESSAGE_TYPE`]. Callers should skip those messages.
    pub fn from_command(command: &'a Command<'_>, limits: &ValueLimits) -> CodecResult<Self> {
        if !command.is(CommandType::SendReliable) {
            return Err(CodecError::UnexpectedCommandType {
                expected: CommandType::SendReliable,
                found: command.command_type,
            });
        }

        let mut reader = ByteReader::new(command.body());
        let signature = reader.read_u8()?;
        let mut message_type = reader.read_u8()?;
        if message_type > MAX_PLAINTEXT_MESSAGE_TYPE {
            return Err(CodecError::EncryptionNotSupported { message_type });
        }
        if message_type == OTHER_OPERATION_RESPONSE {
            message_type = OPERATION_RESPONSE;
        }

        let body = match message_type {
            OPERATION_REQUEST => MessageBody::Request {
                operation_code: reader.read_u8()?,
            },
            EVENT_DATA => MessageBody::Event {
                event_code: reader.read_u8()?,
            },
            OPERATION_RESPONSE => {
                let operation_code = reader.read_u8()?;
                let return_code = reader.read_u16()?;
                let debug_message = match decode_tagged_value(&mut reader, limits)? {
                    Value::Nil => None,
                    Value::String(bytes) => Some(bytes),
                    other => {
                        return Err(CodecError::InvalidDebugMessage { found: other.tag() })
                    }
                };
                MessageBody::Response {
                    operation_code,
                    return_code,
                    debug_message,
                }
            }
            other => MessageBody::Other {
                message_type: other,
            },
        };

        let parameter_count = reader.read_i16()?;
        Ok(Self {
            signature,
            body,
            parameter_count,
            parameters: reader.rest(),
        })
    }
}
