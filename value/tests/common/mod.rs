//! Reference encoder used to build fixtures for decode tests.

#![allow(dead_code)]

use bytestream::ByteWriter;
use value::{TypeTag, TypedArray, Value};

pub fn encode_tagged(writer: &mut ByteWriter, value: &Value) {
    writer.write_u8(value.tag().raw());
    encode_payload(writer, value);
}

pub fn encode_payload(writer: &mut ByteWriter, value: &Value) {
    match value {
        Value::Nil => {}
        Value::Int8(v) => {
            writer.write_i8(*v);
        }
        Value::Int16(v) => {
            writer.write_i16(*v);
        }
        Value::Int32(v) => {
            writer.write_i32(*v);
        }
        Value::Int64(v) => {
            writer.write_i64(*v);
        }
        Value::Float32(v) => {
            writer.write_f32(*v);
        }
        Value::Bool(v) => {
            writer.write_u8(u8::from(*v));
        }
        Value::String(bytes) => encode_string(writer, bytes),
        Value::ByteArray(bytes) => encode_byte_array(writer, bytes),
        Value::Dictionary(dict) => {
            writer
                .write_u8(dict.key_tag)
                .write_u8(dict.value_tag)
                .write_u16(dict.entries.len() as u16);
            for (key, value) in &dict.entries {
                encode_payload(writer, &Value::from(key.clone()));
                encode_payload(writer, value);
            }
        }
        Value::Array(array) => encode_array(writer, array),
    }
}

pub fn encode_array(writer: &mut ByteWriter, array: &TypedArray) {
    writer
        .write_u16(array.len() as u16)
        .write_u8(array.element_tag().raw());
    match array {
        TypedArray::Int16(values) => values.iter().for_each(|v| {
            writer.write_i16(*v);
        }),
        TypedArray::Int32(values) => values.iter().for_each(|v| {
            writer.write_i32(*v);
        }),
        TypedArray::Int64(values) => values.iter().for_each(|v| {
            writer.write_i64(*v);
        }),
        TypedArray::Float32(values) => values.iter().for_each(|v| {
            writer.write_f32(*v);
        }),
        TypedArray::Bool(values) => values.iter().for_each(|v| {
            writer.write_u8(u8::from(*v));
        }),
        TypedArray::String(values) => values.iter().for_each(|v| encode_string(writer, v)),
        TypedArray::Bytes(bytes) => encode_byte_array(writer, bytes),
        TypedArray::Array(arrays) => arrays.iter().for_each(|a| encode_array(writer, a)),
    }
}

fn encode_string(writer: &mut ByteWriter, bytes: &[u8]) {
    writer.write_u16(bytes.len() as u16).write_bytes(bytes);
}

fn encode_byte_array(writer: &mut ByteWriter, bytes: &[i8]) {
    writer.write_u32(bytes.len() as u32);
    for b in bytes {
        writer.write_i8(*b);
    }
}

pub fn encoded(value: &Value) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    encode_payload(&mut writer, value);
    writer.finish()
}

pub const SCALAR_TAGS: [TypeTag; 7] = [
    TypeTag::Int8,
    TypeTag::Int16,
    TypeTag::Int32,
    TypeTag::Int64,
    TypeTag::Float32,
    TypeTag::Boolean,
    TypeTag::String,
];
