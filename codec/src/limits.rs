//! Limits for codec-level decoding.

use value::ValueLimits;

/// Default number of in-flight fragmented messages kept for reassembly.
pub const DEFAULT_REASSEMBLY_CAPACITY: usize = 128;

/// Default largest fragment count a fragmented message may declare.
pub const DEFAULT_MAX_FRAGMENTS: usize = 4096;

/// Default largest payload one fragmented message may collect (1 MiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Every limit a [`Decoder`](crate::Decoder) enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Datagram framing limits.
    pub wire: wire::Limits,
    /// Parameter value limits.
    pub value: ValueLimits,
    /// Maximum number of incomplete fragmented messages held at once.
    ///
    /// Zero is treated as one.
    pub reassembly_capacity: usize,
    /// Maximum fragment count a fragmented message may declare.
    pub max_fragments: usize,
    /// Maximum payload bytes collected for one fragmented message.
    pub max_message_bytes: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            wire: wire::Limits::default(),
            value: ValueLimits::default(),
            reassembly_capacity: DEFAULT_REASSEMBLY_CAPACITY,
            max_fragments: DEFAULT_MAX_FRAGMENTS,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            wire: wire::Limits::for_testing(),
            value: ValueLimits::for_testing(),
            reassembly_capacity: 8,
            max_fragments: 64,
            max_message_bytes: 16 * 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            wire: wire::Limits::unlimited(),
            value: ValueLimits::unlimited(),
            reassembly_capacity: usize::MAX,
            max_fragments: usize::MAX,
            max_message_bytes: usize::MAX,
        }
    }
}
