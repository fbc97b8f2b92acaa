//! Conversion of decoded values into plain JSON.

use codec::ParameterMap;
use serde_json::{Map, Number, Value as Json};
use value::{TypedArray, Value};

/// Converts a decoded value into JSON.
///
/// Keys are stringified, strings are decoded lossily and byte arrays become
/// lists of signed integers. Non-finite floats become `null`.
#[must_use]
pub fn sanitize(value: &Value) -> Json {
    match value {
        Value::Nil => Json::Null,
        Value::Int8(v) => Json::from(*v),
        Value::Int16(v) => Json::from(*v),
        Value::Int32(v) => Json::from(*v),
        Value::Int64(v) => Json::from(*v),
        Value::Float32(v) => float(*v),
        Value::Bool(v) => Json::Bool(*v),
        Value::String(bytes) => text(bytes),
        Value::ByteArray(bytes) => signed_bytes(bytes),
        Value::Dictionary(dictionary) => Json::Object(
            dictionary
                .entries
                .iter()
                .map(|(key, value)| (key.to_string(), sanitize(value)))
                .collect(),
        ),
        Value::Array(array) => sanitize_array(array),
    }
}

/// Converts a parameter map into a JSON object keyed by decimal parameter id.
#[must_use]
pub fn sanitize_parameters(parameters: &ParameterMap) -> Map<String, Json> {
    parameters
        .iter()
        .map(|(id, value)| (id.to_string(), sanitize(value)))
        .collect()
}

fn sanitize_array(array: &TypedArray) -> Json {
    match array {
        TypedArray::Int16(values) => Json::from(values.clone()),
        TypedArray::Int32(values) => Json::from(values.clone()),
        TypedArray::Int64(values) => Json::from(values.clone()),
        TypedArray::Float32(values) => values.iter().map(|v| float(*v)).collect(),
        TypedArray::Bool(values) => Json::from(values.clone()),
        TypedArray::String(values) => values.iter().map(|v| text(v)).collect(),
        TypedArray::Bytes(bytes) => signed_bytes(bytes),
        TypedArray::Array(arrays) => arrays.iter().map(sanitize_array).collect(),
    }
}

fn float(value: f32) -> Json {
    Number::from_f64(f64::from(value)).map_or(Json::Null, Json::Number)
}

fn text(bytes: &[u8]) -> Json {
    Json::String(String::from_utf8_lossy(bytes).into_owned())
}

fn signed_bytes(bytes: &[i8]) -> Json {
    bytes.iter().map(|&b| Json::from(b)).collect()
}
