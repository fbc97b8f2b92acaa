//! Inspection and decoding tools for captured Photon datagrams.
//!
//! This crate sits downstream of the codec:
//!
//! - Inspect datagram framing ([`inspect_datagram`])
//! - Decode capture files into messages ([`decode_files`])
//! - Turn decoded values into plain JSON ([`sanitize`])
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the decoder is doing.

mod files;
mod inspect;
mod message;
mod sanitize;

pub use files::{collect_datagram_paths, decode_files, DecodeReport, FileFailure};
pub use inspect::{inspect_datagram, CommandSummary, InspectReport};
pub use message::{format_pretty, to_message, Message};
pub use sanitize::{sanitize, sanitize_parameters};
