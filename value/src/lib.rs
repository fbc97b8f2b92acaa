//! Recursive tagged-value decoding for Photon message parameters.
//!
//! Every parameter in a Photon message is a one-byte [`TypeTag`] followed by a
//! payload whose layout depends on the tag. Dictionaries and typed arrays nest
//! further values, so decoding is a single recursive dispatch over the tag.
//!
//! # Wire quirks
//!
//! - Strings and dictionaries use 16-bit lengths; byte arrays use 32-bit lengths.
//! - A typed array of byte arrays is a single byte array: the element decode
//!   re-reads its own 32-bit length and ignores the array's 16-bit one.
//! - Dictionary keys are limited to [`DictKey`] types.
//!
//! # Example
//!
//! ```
//! use bytestream::ByteReader;
//! use value::{decode_value, TypeTag, Value, ValueLimits};
//!
//! let body = [0x00, 0x02, b'o', b'k'];
//! let mut reader = ByteReader::new(&body);
//! let value = decode_value(&mut reader, TypeTag::String.raw(), &ValueLimits::default()).unwrap();
//! assert_eq!(value, Value::String(b"ok".to_vec()));
//! ```

mod decode;
mod error;
mod limits;
mod tag;
mod value;

pub use decode::{decode_tagged_value, decode_value};
pub use error::{ValueError, ValueResult};
pub use limits::ValueLimits;
pub use tag::TypeTag;
pub use value::{DictKey, Dictionary, TypedArray, Value};
