//! Parameter block decoding.

use std::collections::BTreeMap;

use bytestream::ByteReader;
use value::{decode_value, Value, ValueLimits};

use crate::error::CodecResult;
use crate::message::ReliableMessage;

/// Decoded parameters keyed by parameter id.
pub type ParameterMap = BTreeMap<u8, Value>;

/// Decodes the `(id, tag, value)` triples of a message.
///
/// A repeated id keeps the last value. A negative count yields an empty map.
///
/// # Errors
///
/// Any failing parameter fails the whole map.
pub fn decode_parameters(
    message: &ReliableMessage<'_>,
    limits: &ValueLimits,
) -> CodecResult<ParameterMap> {
    let mut reader = ByteReader::new(message.parameters);
    let mut parameters = ParameterMap::new();
    for _ in 0..message.parameter_count.max(0) {
        let id = reader.read_u8()?;
        let tag = reader.read_u8()?;
        let value = decode_value(&mut reader, tag, limits)?;
        parameters.insert(id, value);
    }
    Ok(parameters)
}
