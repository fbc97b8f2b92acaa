//! Datagram decoding into a layer header plus commands.

use std::borrow::Cow;

use bytestream::ByteReader;

use crate::command::Command;
use crate::error::{DecodeError, LimitKind, WireResult};
use crate::header::{LayerHeader, COMMAND_HEADER_SIZE, LAYER_HEADER_SIZE};
use crate::limits::Limits;

/// A decoded datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer<'a> {
    pub header: LayerHeader,
    /// Commands in wire order; exactly `header.command_count` of them.
    pub commands: Vec<Command<'a>>,
    /// Bytes consumed by the header and commands.
    pub contents: &'a [u8],
    /// Trailing bytes after the last command, left for whatever decodes next.
    pub payload: &'a [u8],
}

/// Decodes a captured datagram into its header and commands.
///
/// A single malformed command aborts the whole datagram.
pub fn decode_layer<'a>(buf: &'a [u8], limits: &Limits) -> WireResult<Layer<'a>> {
    if buf.len() < LAYER_HEADER_SIZE {
        return Err(DecodeError::DatagramTooSmall {
            actual: buf.len(),
            required: LAYER_HEADER_SIZE,
        });
    }
    if buf.len() > limits.max_datagram_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::DatagramBytes,
            limit: limits.max_datagram_bytes,
            actual: buf.len(),
        });
    }

    let mut reader = ByteReader::new(buf);
    let header = LayerHeader {
        peer_id: reader.read_u16()?,
        crc_enabled: reader.read_u8()?,
        command_count: reader.read_u8()?,
        timestamp: reader.read_u32()?,
        challenge: reader.read_i32()?,
    };

    let command_count = usize::from(header.command_count);
    if command_count > limits.max_commands {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::CommandCount,
            limit: limits.max_commands,
            actual: command_count,
        });
    }

    let mut commands = Vec::with_capacity(command_count);
    for index in 0..command_count {
        commands.push(decode_command(&mut reader, index)?);
    }

    Ok(Layer {
        header,
        commands,
        contents: reader.consumed(),
        payload: reader.rest(),
    })
}

fn decode_command<'a>(reader: &mut ByteReader<'a>, index: usize) -> WireResult<Command<'a>> {
    let command_type = reader.read_u8()?;
    let channel_id = reader.read_u8()?;
    let flags = reader.read_u8()?;
    let reserved_byte = reader.read_u8()?;
    let length = reader.read_i32()?;
    let reliable_sequence_number = reader.read_i32()?;

    let body_len = usize::try_from(length)
        .ok()
        .and_then(|len| len.checked_sub(COMMAND_HEADER_SIZE))
        .ok_or(DecodeError::InvalidCommandLength {
            command: index,
            length,
        })?;
    if body_len > reader.remaining() {
        return Err(DecodeError::TruncatedCommand {
            command: index,
            needed: body_len,
            available: reader.remaining(),
        });
    }
    let body = reader.read_bytes(body_len)?;

    Ok(Command {
        command_type,
        channel_id,
        flags,
        reserved_byte,
        length,
        reliable_sequence_number,
        body: Cow::Borrowed(body),
    })
}
