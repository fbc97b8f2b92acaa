//! Datagram fixtures shared by the integration tests.

#![allow(dead_code)]

use bytestream::ByteWriter;
use wire::CommandType;

pub const SIGNATURE: u8 = 0xF3;

/// One command to place in a fixture datagram.
#[derive(Debug, Clone)]
pub struct RawCommand {
    pub command_type: u8,
    pub sequence: i32,
    pub body: Vec<u8>,
}

impl RawCommand {
    pub fn reliable(sequence: i32, body: Vec<u8>) -> Self {
        Self {
            command_type: CommandType::SendReliable.raw(),
            sequence,
            body,
        }
    }

    pub fn fragment(sequence: i32, count: i32, number: i32, payload: &[u8]) -> Self {
        let mut writer = ByteWriter::new();
        writer
            .write_i32(sequence)
            .write_i32(count)
            .write_i32(number)
            .write_i32(0)
            .write_i32(0)
            .write_bytes(payload);
        Self {
            command_type: CommandType::SendReliableFragment.raw(),
            sequence,
            body: writer.finish(),
        }
    }

    pub fn other(command_type: CommandType, sequence: i32) -> Self {
        Self {
            command_type: command_type.raw(),
            sequence,
            body: Vec::new(),
        }
    }
}

/// Encodes a datagram with a zeroed layer header.
pub fn datagram(commands: &[RawCommand]) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    writer
        .write_u16(0x0001)
        .write_u8(0)
        .write_u8(u8::try_from(commands.len()).unwrap())
        .write_u32(0)
        .write_i32(0);
    for command in commands {
        writer
            .write_u8(command.command_type)
            .write_u8(0)
            .write_u8(0)
            .write_u8(0)
            .write_i32(i32::try_from(command.body.len() + 12).unwrap())
            .write_i32(command.sequence)
            .write_bytes(&command.body);
    }
    writer.finish()
}

/// Encodes an event message body around an already encoded parameter block.
pub fn event(code: u8, parameter_count: i16, parameters: &[u8]) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    writer
        .write_u8(SIGNATURE)
        .write_u8(4)
        .write_u8(code)
        .write_i16(parameter_count)
        .write_bytes(parameters);
    writer.finish()
}

/// Encodes an operation request body with no parameters.
pub fn request(code: u8) -> Vec<u8> {
    vec![SIGNATURE, 2, code, 0x00, 0x00]
}
