//! Reliable fragment headers.

use bytestream::ByteReader;
use wire::{Command, CommandType};

use crate::error::{CodecError, CodecResult};

/// Size of the fragment header that precedes each fragment payload.
pub const FRAGMENT_HEADER_SIZE: usize = 20;

/// One piece of a message too large for a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReliableFragment<'a> {
    /// Sequence number shared by every fragment of the message.
    pub sequence_number: i32,
    pub fragment_count: i32,
    /// Index of this fragment, starting at zero.
    pub fragment_number: i32,
    pub total_length: i32,
    pub fragment_offset: i32,
    pub payload: &'a [u8],
}

impl<'a> ReliableFragment<'a> {
    /// Interprets a `SendReliableFragment` command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command has another type or its body is
    /// shorter than [`FRAGMENT_HEADER_SIZE`].
    pub fn from_command(command: &'a Command<'_>) -> CodecResult<Self> {
        if !command.is(CommandType::SendReliableFragment) {
            return Err(CodecError::UnexpectedCommandType {
                expected: CommandType::SendReliableFragment,
                found: command.command_type,
            });
        }

        let mut reader = ByteReader::new(command.body());
        reader.ensure_bytes(FRAGMENT_HEADER_SIZE)?;
        Ok(Self {
            sequence_number: reader.read_i32()?,
            fragment_count: reader.read_i32()?,
            fragment_number: reader.read_i32()?,
            total_length: reader.read_i32()?,
            fragment_offset: reader.read_i32()?,
            payload: reader.rest(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytestream::ByteWriter;
    use std::borrow::Cow;

    fn fragment_command(body: Vec<u8>) -> Command<'static> {
        let mut command = Command::reliable(0, body);
        command.command_type = CommandType::SendReliableFragment.raw();
        command
    }

    #[test]
    fn header_fields_in_order() {
        let mut writer = ByteWriter::new();
        writer
            .write_i32(40)
            .write_i32(3)
            .write_i32(1)
            .write_i32(900)
            .write_i32(300)
            .write_bytes(&[1, 2, 3]);
        let command = fragment_command(writer.finish());

        let fragment = ReliableFragment::from_command(&command).unwrap();
        assert_eq!(fragment.sequence_number, 40);
        assert_eq!(fragment.fragment_count, 3);
        assert_eq!(fragment.fragment_number, 1);
        assert_eq!(fragment.total_length, 900);
        assert_eq!(fragment.fragment_offset, 300);
        assert_eq!(fragment.payload, &[1, 2, 3]);
    }

    #[test]
    fn empty_payload() {
        let command = fragment_command(vec![0; FRAGMENT_HEADER_SIZE]);
        let fragment = ReliableFragment::from_command(&command).unwrap();
        assert!(fragment.payload.is_empty());
    }

    #[test]
    fn short_header_rejected() {
        let command = fragment_command(vec![0; FRAGMENT_HEADER_SIZE - 1]);
        let err = ReliableFragment::from_command(&command).unwrap_err();
        assert!(matches!(err, CodecError::Bytes(_)));
    }

    #[test]
    fn wrong_command_type_rejected() {
        let body = [0u8; FRAGMENT_HEADER_SIZE];
        let command = Command {
            command_type: CommandType::SendUnreliable.raw(),
            channel_id: 0,
            flags: 0,
            reserved_byte: 0,
            length: 32,
            reliable_sequence_number: 0,
            body: Cow::Borrowed(&body),
        };
        let err = ReliableFragment::from_command(&command).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnexpectedCommandType {
                expected: CommandType::SendReliableFragment,
                ..
            }
        ));
    }
}
