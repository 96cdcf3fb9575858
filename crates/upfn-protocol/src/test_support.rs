//! Helpers for exercising operation tables in provider tests.
//!
//! Enabled by the `test-support` feature.

use std::error::Error;

use crate::dispatch::OperationTable;
use crate::error::ProtocolError;
use crate::exit::{Outcome, serve};
use crate::protocol::{Evaluated, Request};
use crate::value::{DynamicValue, Mapping};

pub use crate::clock::MockClock;
pub use crate::entropy::MockEntropySource;

/// Converts a JSON object into a parameter mapping.
///
/// Any other JSON value yields an empty mapping.
#[must_use]
pub fn mapping(value: serde_json::Value) -> Mapping {
    match DynamicValue::from(value) {
        DynamicValue::Mapping(entries) => entries,
        _ => Mapping::new(),
    }
}

/// Builds a request for `function` with the given JSON parameters.
#[must_use]
pub fn request(function: &str, params: serde_json::Value) -> Request {
    Request::new(function).with_params(mapping(params))
}

/// Dispatches `function` with `params` directly, bypassing the codec.
///
/// # Errors
///
/// Returns whatever the dispatcher returns.
pub fn call<B: ?Sized>(
    table: &OperationTable<B>,
    backend: &B,
    function: &str,
    params: serde_json::Value,
) -> Result<Evaluated, ProtocolError> {
    table.dispatch(&request(function, params), backend)
}

/// Runs a raw request line through [`serve`] and parses the written
/// response.
///
/// # Errors
///
/// Returns an error when the response cannot be written or is not valid
/// JSON.
pub fn exchange<B: ?Sized>(
    table: &OperationTable<B>,
    backend: &B,
    input: &str,
) -> Result<(Outcome, serde_json::Value), Box<dyn Error>> {
    let mut output = Vec::new();
    let outcome = serve(table, backend, input.as_bytes(), &mut output)?;
    let response = serde_json::from_slice(&output)?;
    Ok((outcome, response))
}
