//! Bounded big-endian byte primitives for Photon datagram decoding.
//!
//! This crate provides [`ByteReader`] for reading fixed-width big-endian
//! integers and length-delimited slices out of a captured buffer, and a small
//! [`ByteWriter`] used to build fixtures.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - Every read is bounds-checked before it touches the buffer.
//! - **No domain knowledge** - This crate knows nothing about commands, messages, or type tags.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u16(0xBEEF).write_i32(-7);
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u16().unwrap(), 0xBEEF);
//! assert_eq!(reader.read_i32().unwrap(), -7);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;
