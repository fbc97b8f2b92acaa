//! Tag-dispatched value decoding.

use std::collections::HashMap;

use bytestream::{ByteReader, ByteResult};

use crate::error::{ValueError, ValueResult};
use crate::limits::ValueLimits;
use crate::tag::TypeTag;
use crate::value::{DictKey, Dictionary, TypedArray, Value};

/// Decodes one value whose type tag has already been read.
///
/// Composite values recurse back into this function. Any failure aborts the
/// whole value; nothing partial is returned.
pub fn decode_value(reader: &mut ByteReader<'_>, tag: u8, limits: &ValueLimits) -> ValueResult<Value> {
    decode_at_depth(reader, tag, limits, 0)
}

/// Reads a tag byte and then the value it announces.
pub fn decode_tagged_value(reader: &mut ByteReader<'_>, limits: &ValueLimits) -> ValueResult<Value> {
    let tag = reader.read_u8()?;
    decode_value(reader, tag, limits)
}

fn decode_at_depth(
    reader: &mut ByteReader<'_>,
    tag: u8,
    limits: &ValueLimits,
    depth: usize,
) -> ValueResult<Value> {
    let Some(tag) = TypeTag::from_raw(tag) else {
        return Err(ValueError::UnsupportedType { tag });
    };
    let value = match tag {
        TypeTag::Nil => Value::Nil,
        TypeTag::Dictionary => {
            let depth = descend(depth, limits)?;
            Value::Dictionary(decode_dictionary(reader, limits, depth)?)
        }
        TypeTag::Int8 => Value::Int8(reader.read_i8()?),
        TypeTag::Float32 => Value::Float32(reader.read_f32()?),
        TypeTag::Int32 => Value::Int32(reader.read_i32()?),
        TypeTag::Int16 => Value::Int16(reader.read_i16()?),
        TypeTag::Int64 => Value::Int64(reader.read_i64()?),
        TypeTag::Boolean => Value::Bool(decode_bool(reader)?),
        TypeTag::String => Value::String(decode_string(reader)?),
        TypeTag::ByteArray => Value::ByteArray(decode_byte_array(reader)?),
        TypeTag::TypedArray => {
            let depth = descend(depth, limits)?;
            Value::Array(decode_typed_array(reader, limits, depth)?)
        }
    };
    Ok(value)
}

fn descend(depth: usize, limits: &ValueLimits) -> ValueResult<usize> {
    let next = depth.saturating_add(1);
    if next > limits.max_depth {
        return Err(ValueError::DepthExceeded {
            limit: limits.max_depth,
        });
    }
    Ok(next)
}

fn decode_bool(reader: &mut ByteReader<'_>) -> ValueResult<bool> {
    match reader.read_u8()? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(ValueError::InvalidBoolean { value }),
    }
}

/// 16-bit length, then raw bytes.
fn decode_string(reader: &mut ByteReader<'_>) -> ValueResult<Vec<u8>> {
    let len = usize::from(reader.read_u16()?);
    Ok(reader.read_bytes(len)?.to_vec())
}

/// 32-bit length, then raw bytes reinterpreted as signed.
fn decode_byte_array(reader: &mut ByteReader<'_>) -> ValueResult<Vec<i8>> {
    let len = usize::try_from(reader.read_u32()?).unwrap_or(usize::MAX);
    let bytes = reader.read_bytes(len)?;
    Ok(bytes.iter().map(|&b| i8::from_be_bytes([b])).collect())
}

fn decode_dictionary(
    reader: &mut ByteReader<'_>,
    limits: &ValueLimits,
    depth: usize,
) -> ValueResult<Dictionary> {
    let key_tag = reader.read_u8()?;
    let value_tag = reader.read_u8()?;
    let len = usize::from(reader.read_u16()?);

    let mut entries = HashMap::with_capacity(len.min(reader.remaining()));
    for _ in 0..len {
        let key = decode_key(reader, key_tag, limits, depth)?;
        let value = decode_at_depth(reader, value_tag, limits, depth)?;
        entries.insert(key, value);
    }

    Ok(Dictionary {
        key_tag,
        value_tag,
        entries,
    })
}

fn decode_key(
    reader: &mut ByteReader<'_>,
    tag: u8,
    limits: &ValueLimits,
    depth: usize,
) -> ValueResult<DictKey> {
    if TypeTag::from_raw(tag).is_some_and(|tag| !tag.is_key_type()) {
        return Err(ValueError::UnsupportedKeyType { tag });
    }
    let value = decode_at_depth(reader, tag, limits, depth)?;
    DictKey::from_value(value).ok_or(ValueError::UnsupportedKeyType { tag })
}

/// 16-bit length, element tag, then the elements.
///
/// Byte-array elements ignore the outer length and re-read their own 32-bit
/// length, so the whole array is one byte array on the wire.
fn decode_typed_array(
    reader: &mut ByteReader<'_>,
    limits: &ValueLimits,
    depth: usize,
) -> ValueResult<TypedArray> {
    let len = usize::from(reader.read_u16()?);
    let element = reader.read_u8()?;

    let array = match TypeTag::from_raw(element) {
        Some(TypeTag::Int16) => TypedArray::Int16(read_fixed(reader, len, 2, ByteReader::read_i16)?),
        Some(TypeTag::Int32) => TypedArray::Int32(read_fixed(reader, len, 4, ByteReader::read_i32)?),
        Some(TypeTag::Int64) => TypedArray::Int64(read_fixed(reader, len, 8, ByteReader::read_i64)?),
        Some(TypeTag::Float32) => {
            TypedArray::Float32(read_fixed(reader, len, 4, ByteReader::read_f32)?)
        }
        Some(TypeTag::String) => TypedArray::String(
            (0..len)
                .map(|_| decode_string(reader))
                .collect::<ValueResult<_>>()?,
        ),
        Some(TypeTag::Boolean) => TypedArray::Bool(
            (0..len)
                .map(|_| decode_bool(reader))
                .collect::<ValueResult<_>>()?,
        ),
        // Captured traffic announces byte arrays with the int8 tag here.
        Some(TypeTag::Int8 | TypeTag::ByteArray) => TypedArray::Bytes(decode_byte_array(reader)?),
        Some(TypeTag::TypedArray) => {
            let depth = descend(depth, limits)?;
            TypedArray::Array(
                (0..len)
                    .map(|_| decode_typed_array(reader, limits, depth))
                    .collect::<ValueResult<_>>()?,
            )
        }
        _ => return Err(ValueError::UnsupportedArrayElement { tag: element }),
    };
    Ok(array)
}

fn read_fixed<'a, T>(
    reader: &mut ByteReader<'a>,
    len: usize,
    width: usize,
    read: impl Fn(&mut ByteReader<'a>) -> ByteResult<T>,
) -> ValueResult<Vec<T>> {
    reader.ensure_bytes(len.saturating_mul(width))?;
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(read(reader)?);
    }
    Ok(out)
}
