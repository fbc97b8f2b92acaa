//! Serializable message records.

use codec::{DecodedMessage, MessageBody};
use serde::Serialize;
use serde_json::{Map, Value as Json};

use crate::sanitize::sanitize_parameters;

/// A decoded message in the shape handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// `request`, `response`, `event` or `other`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Operation or event code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u8>,
    /// Response return code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_message: Option<String>,
    /// Parameters keyed by decimal id.
    pub data: Map<String, Json>,
}

/// Builds the serializable form of a decoded message.
#[must_use]
pub fn to_message(message: &DecodedMessage) -> Message {
    let (return_code, debug_message) = match &message.body {
        MessageBody::Response {
            return_code,
            debug_message,
            ..
        } => (
            Some(*return_code),
            debug_message
                .as_deref()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
        ),
        _ => (None, None),
    };
    Message {
        kind: message.body.tag(),
        code: message.body.code(),
        return_code,
        debug_message,
        data: sanitize_parameters(&message.parameters),
    }
}

/// Renders messages one per line for terminal output.
#[must_use]
pub fn format_pretty(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(message.kind);
        if let Some(code) = message.code {
            out.push_str(&format!(" code={code}"));
        }
        if let Some(return_code) = message.return_code {
            out.push_str(&format!(" return={return_code}"));
        }
        if let Some(debug) = &message.debug_message {
            out.push_str(&format!(" debug={debug:?}"));
        }
        for (id, value) in &message.data {
            out.push_str(&format!("\n  {id}: {value}"));
        }
        out.push('\n');
    }
    out
}
