//! Raw commands split out of a datagram.

use std::borrow::Cow;

use crate::header::{CommandType, COMMAND_HEADER_SIZE};

/// A single command: its 12-byte header fields plus an opaque body.
///
/// Commands decoded from a datagram borrow their body from it. Commands
/// synthesized by fragment reassembly own theirs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    /// Raw command type; see [`Command::kind`].
    pub command_type: u8,
    pub channel_id: u8,
    pub flags: u8,
    pub reserved_byte: u8,
    /// Total command size, header included.
    pub length: i32,
    pub reliable_sequence_number: i32,
    /// Exactly `length - 12` bytes.
    pub body: Cow<'a, [u8]>,
}

impl<'a> Command<'a> {
    /// Synthesizes a `SendReliable` command around an owned body.
    ///
    /// Used when a fragmented message has been fully reassembled.
    #[must_use]
    pub fn reliable(reliable_sequence_number: i32, body: Vec<u8>) -> Command<'static> {
        let length = i32::try_from(body.len() + COMMAND_HEADER_SIZE).unwrap_or(i32::MAX);
        Command {
            command_type: CommandType::SendReliable.raw(),
            channel_id: 0,
            flags: 0,
            reserved_byte: 0,
            length,
            reliable_sequence_number,
            body: Cow::Owned(body),
        }
    }

    /// Returns the parsed command type, or `None` for unknown values.
    #[must_use]
    pub const fn kind(&self) -> Option<CommandType> {
        CommandType::from_raw(self.command_type)
    }

    /// Returns `true` if this command has the given type.
    #[must_use]
    pub const fn is(&self, kind: CommandType) -> bool {
        self.command_type == kind.raw()
    }

    /// Returns the command body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
