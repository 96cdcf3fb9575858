//! Reading the request and writing the response.
//!
//! [`decode`] consumes exactly one JSON value from the input stream and never
//! reads past it. [`encode`] writes one JSON object followed by a newline and
//! flushes, so the host sees the whole response before the process exits.

use std::io::{Read, Write};

use crate::error::{EncodeError, ProtocolError};
use crate::protocol::{Request, Response};

/// Decodes one request object from `reader`.
///
/// # Errors
///
/// Returns [`ProtocolError::Decode`] when the stream is empty, holds
/// malformed or truncated JSON, holds a non-object value, or holds an object
/// whose envelope fields have the wrong types.
pub fn decode(reader: impl Read) -> Result<Request, ProtocolError> {
    let mut stream =
        serde_json::Deserializer::from_reader(reader).into_iter::<serde_json::Value>();
    let value = match stream.next() {
        Some(Ok(value)) => value,
        Some(Err(source)) => return Err(ProtocolError::decode(source)),
        None => {
            return Err(ProtocolError::Decode {
                message: String::from("EOF while reading request"),
                source: None,
            });
        }
    };

    if !value.is_object() {
        return Err(ProtocolError::Decode {
            message: format!("expected a JSON object, found {}", json_shape(&value)),
            source: None,
        });
    }

    serde_json::from_value(value).map_err(ProtocolError::decode)
}

/// Encodes `response` as a single newline-terminated line and flushes.
///
/// # Errors
///
/// Returns [`EncodeError`] when serialisation or any write fails.
pub fn encode(writer: &mut impl Write, response: &Response) -> Result<(), EncodeError> {
    let payload =
        serde_json::to_string(response).map_err(|source| EncodeError::Serialize { source })?;
    writer
        .write_all(payload.as_bytes())
        .map_err(|source| EncodeError::Write { source })?;
    writer
        .write_all(b"\n")
        .map_err(|source| EncodeError::Write { source })?;
    writer
        .flush()
        .map_err(|source| EncodeError::Write { source })
}

const fn json_shape(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
