//! Configurable limits for bounded decoding.

/// Wire-level limits for datagram decoding.
///
/// These are checked before any command is parsed. Body parsing limits
/// belong to higher layers (value/codec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum datagram size in bytes.
    pub max_datagram_bytes: usize,

    /// Maximum number of commands in a datagram.
    pub max_commands: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Largest possible UDP payload; real traffic stays near the MTU
            max_datagram_bytes: 64 * 1024,

            // The header count field is a single byte
            max_commands: u8::MAX as usize,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_datagram_bytes: 1500,
            max_commands: 16,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_datagram_bytes: usize::MAX,
            max_commands: usize::MAX,
        }
    }
}
