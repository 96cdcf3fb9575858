//! Crate-level lifecycle and BDD tests.

use std::cell::Cell;
use std::io::{self, Write};

use rstest::rstest;
use serde_json::{Value, json};

use crate::dispatch::{Invocation, Operation, OperationResult, OperationTable};
use crate::error::{EncodeError, OperationError};
use crate::exit::{ENCODING_FAILURE_STATUS, Outcome, serve};
use crate::protocol::Evaluated;


/// Backend that records whether any handler ran.
#[derive(Default)]
struct Recorder {
    invoked: Cell<bool>,
}

fn double(call: &Invocation<'_, Recorder>) -> OperationResult {
    call.backend().invoked.set(true);
    let n = call.params().get_i64("n", 0);
    n.checked_mul(2)
        .map(Evaluated::int)
        .ok_or_else(|| OperationError::invalid("overflow"))
}

fn fail(call: &Invocation<'_, Recorder>) -> OperationResult {
    call.backend().invoked.set(true);
    Err(OperationError::invalid("always fails"))
}

const TABLE: OperationTable<Recorder> = OperationTable::new(
    "demo",
    &[Operation::new("double", double), Operation::new("fail", fail)],
);

fn run(input: &str) -> (Outcome, Value, bool) {
    let recorder = Recorder::default();
    let mut output = Vec::new();
    let outcome = serve(&TABLE, &recorder, input.as_bytes(), &mut output).expect("encode");
    let response: Value = serde_json::from_slice(&output).expect("response is JSON");
    assert_eq!(output.last(), Some(&b'\n'), "response must end with a newline");
    (outcome, response, recorder.invoked.get())
}

fn assert_exclusive(response: &Value) {
    let object = response.as_object().expect("response is an object");
    let has_value = object.contains_key("value");
    let has_error = object.contains_key("error");
    assert!(has_value != has_error, "exactly one shape expected: {response}");
    assert_eq!(object.contains_key("type"), has_value);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn success_writes_value_and_type() {
    let (outcome, response, invoked) = run(r#"{"function":"double","params":{"n":21}}"#);
    assert_eq!(outcome, Outcome::Value);
    assert_eq!(response, json!({"value": 42, "type": "int"}));
    assert!(invoked);
}

#[test]
fn operation_failure_writes_error_only() {
    let (outcome, response, _) = run(r#"{"function":"fail"}"#);
    assert_eq!(outcome, Outcome::Error);
    assert_eq!(response, json!({"error": "always fails"}));
}

#[test]
fn unknown_function_never_invokes_a_handler() {
    let (outcome, response, invoked) = run(r#"{"function":"bogus"}"#);
    assert_eq!(outcome, Outcome::Error);
    assert_eq!(response, json!({"error": "Unknown function: bogus"}));
    assert!(!invoked);
}

#[rstest]
#[case::garbage("not valid json")]
#[case::empty("")]
#[case::truncated("{\"function\":\"double\"")]
#[case::scalar("42")]
fn malformed_requests_are_reported_in_band(#[case] input: &str) {
    let (outcome, response, invoked) = run(input);
    assert_eq!(outcome, Outcome::Error);
    let message = response
        .get("error")
        .and_then(Value::as_str)
        .expect("error message");
    assert!(message.starts_with("Invalid request: "), "got {message}");
    assert!(!invoked);
}

#[rstest]
#[case::success(r#"{"function":"double","params":{"n":1}}"#)]
#[case::failure(r#"{"function":"fail"}"#)]
#[case::unknown(r#"{"function":""}"#)]
#[case::null_params(r#"{"function":"double","params":null,"context":null}"#)]
#[case::decode("[")]
fn every_response_has_exactly_one_shape(#[case] input: &str) {
    let (_, response, _) = run(input);
    assert_exclusive(&response);
}

#[test]
fn outcomes_map_to_exit_statuses() {
    assert_eq!(Outcome::Value.status(), 0);
    assert_eq!(Outcome::Error.status(), 1);
    assert!(
        [Outcome::Value, Outcome::Error]
            .iter()
            .all(|outcome| outcome.status() != ENCODING_FAILURE_STATUS)
    );
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn unwritable_response_is_an_encode_error() {
    let recorder = Recorder::default();
    let result = serve(
        &TABLE,
        &recorder,
        &br#"{"function":"double"}"#[..],
        &mut ClosedPipe,
    );
    let error = result.expect_err("write fails");
    assert!(matches!(error, EncodeError::Write { .. }));
    assert!(
        error.to_string().starts_with("failed to write response: "),
        "{error}"
    );
    assert!(recorder.invoked.get());
}
