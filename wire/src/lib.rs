//! Photon datagram framing.
//!
//! This crate splits one captured datagram into its layer header and the
//! ordered list of commands it carries. It does not know about messages,
//! fragments or value encoding, only the structure of datagrams.
//!
//! # Design Principles
//!
//! - **Passive** - Only the receive direction is implemented.
//! - **Bounded decoding** - Every declared length is checked against the bytes actually present.
//! - **No domain knowledge** - This crate handles framing, not message semantics.

mod command;
mod error;
mod header;
mod layer;
mod limits;

pub use command::Command;
pub use error::{DecodeError, LimitKind, WireResult};
pub use header::{CommandType, LayerHeader, COMMAND_HEADER_SIZE, LAYER_HEADER_SIZE};
pub use layer::{decode_layer, Layer};
pub use limits::Limits;
