//! Message decoding for captured Photon traffic.
//!
//! This is the main codec crate that ties together `bytestream`, `wire` and
//! `value`: it interprets the commands of a datagram, reassembles fragmented
//! messages and decodes their parameters.
//!
//! # Features
//!
//! - Reliable message header interpretation (request, response, event)
//! - Fragment reassembly with a bounded, least-recently-used cache
//! - Parameter block decoding into a [`ParameterMap`]
//! - A [`Decoder`] session that keeps going past undecodable messages
//!
//! # Design Principles
//!
//! - **Passive** - Traffic is only ever decoded, never produced.
//! - **Bounded** - Every allocation is backed by bytes actually present.
//! - **Deterministic** - Same datagram sequence produces the same messages.
//!
//! # Example
//!
//! ```
//! use codec::{Decoder, MessageBody};
//! use value::Value;
//!
//! let datagram = [
//!     0x00, 0x01, 0x00, 0x01, // peer id, crc, command count
//!     0x00, 0x00, 0x00, 0x00, // timestamp
//!     0x00, 0x00, 0x00, 0x00, // challenge
//!     0x06, 0x00, 0x00, 0x00, // send reliable
//!     0x00, 0x00, 0x00, 0x14, // length 20
//!     0x00, 0x00, 0x00, 0x01, // sequence
//!     0xF3, 0x04, 0x01, 0x00, 0x01, 0x05, 0x6F, 0x01,
//! ];
//! let mut decoder = Decoder::default();
//! let messages = decoder.decode_datagram(&datagram).unwrap();
//! assert_eq!(messages[0].body, MessageBody::Event { event_code: 1 });
//! assert_eq!(messages[0].parameters[&5], Value::Bool(true));
//! ```

mod decoder;
mod error;
mod fragment;
mod limits;
mod message;
mod params;
mod reassembly;

pub use decoder::{DecodedMessage, Decoder, DecoderStats};
pub use error::{CodecError, CodecResult};
pub use fragment::{ReliableFragment, FRAGMENT_HEADER_SIZE};
pub use limits::{
    CodecLimits, DEFAULT_MAX_FRAGMENTS, DEFAULT_MAX_MESSAGE_BYTES, DEFAULT_REASSEMBLY_CAPACITY,
};
pub use message::{
    MessageBody, ReliableMessage, EVENT_DATA, MAX_PLAINTEXT_MESSAGE_TYPE, OPERATION_REQUEST,
    OPERATION_RESPONSE, OTHER_OPERATION_RESPONSE,
};
pub use params::{decode_parameters, ParameterMap};
pub use reassembly::Reassembler;
pub use value::ValueLimits;
pub use wire::Limits as WireLimits;
