//! Layer and command header types and constants.

/// Layer header size in bytes (12 total).
pub const LAYER_HEADER_SIZE: usize = 2 + 1 + 1 + 4 + 4;

/// Command header size in bytes (12 total).
///
/// A command's `length` field counts these bytes as well as its body.
pub const COMMAND_HEADER_SIZE: usize = 1 + 1 + 1 + 1 + 4 + 4;

/// Datagram-level header preceding the command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerHeader {
    /// Peer identifier assigned by the server.
    pub peer_id: u16,
    /// Non-zero when the datagram carries a CRC.
    pub crc_enabled: u8,
    /// Number of commands that follow the header.
    pub command_count: u8,
    /// Sender timestamp.
    pub timestamp: u32,
    /// Connection challenge.
    pub challenge: i32,
}

impl LayerHeader {
    /// Returns `true` if the CRC flag is set.
    #[must_use]
    pub const fn has_crc(&self) -> bool {
        self.crc_enabled != 0
    }
}

/// Command types carried in the first byte of a command header.
///
/// Only [`SendReliable`](Self::SendReliable) and
/// [`SendReliableFragment`](Self::SendReliableFragment) carry application
/// messages; the rest are connection plumbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum CommandType {
    Acknowledge = 1,
    Connect = 2,
    VerifyConnect = 3,
    Disconnect = 4,
    Ping = 5,
    SendReliable = 6,
    SendUnreliable = 7,
    SendReliableFragment = 8,
}

impl CommandType {
    /// Parses a command type from a raw byte.
    ///
    /// Unknown values are not an error at the framing level, so this returns
    /// `None` instead of failing.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Acknowledge),
            2 => Some(Self::Connect),
            3 => Some(Self::VerifyConnect),
            4 => Some(Self::Disconnect),
            5 => Some(Self::Ping),
            6 => Some(Self::SendReliable),
            7 => Some(Self::SendUnreliable),
            8 => Some(Self::SendReliableFragment),
            _ => None,
        }
    }

    /// Returns the raw wire value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Returns `true` for command types that carry message payloads.
    #[must_use]
    pub const fn carries_payload(self) -> bool {
        matches!(self, Self::SendReliable | Self::SendReliableFragment)
    }
}
