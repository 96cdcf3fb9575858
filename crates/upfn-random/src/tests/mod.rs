//! Unit tests for the random operations.

use std::collections::HashSet;

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use upfn_protocol::test_support::{MockEntropySource, call};
use upfn_protocol::{EntropySource, ErrorKind, OperationError, SeededEntropy, TypeTag};

use crate::TABLE;


#[fixture]
fn seeded() -> SeededEntropy {
    SeededEntropy::new(0x5eed)
}

fn evaluate(
    entropy: &(dyn EntropySource + 'static),
    function: &str,
    params: Value,
) -> (Value, TypeTag) {
    let (value, tag) = call(&TABLE, entropy, function, params)
        .expect("operation succeeds")
        .into_parts();
    (Value::from(value), tag)
}

fn failure(function: &str, params: Value) -> (String, ErrorKind) {
    let entropy = SeededEntropy::new(1);
    let error = call(&TABLE, &entropy, function, params)
        .expect_err("operation fails");
    (error.to_string(), error.kind())
}

#[rstest]
fn int_stays_within_half_open_range() {
    for seed in 0..64 {
        let entropy = SeededEntropy::new(seed);
        let (value, tag) = evaluate(&entropy, "int", json!({"min": 5, "max": 8}));
        assert_eq!(tag, TypeTag::Int);
        let n = value.as_i64().expect("integer");
        assert!((5..8).contains(&n), "{n} outside [5, 8)");
    }
}

#[rstest]
fn float_stays_within_half_open_range() {
    for seed in 0..64 {
        let entropy = SeededEntropy::new(seed);
        let (value, tag) = evaluate(&entropy, "float", json!({"min": -1.5, "max": 0.5}));
        assert_eq!(tag, TypeTag::Float);
        let x = value.as_f64().expect("number");
        assert!((-1.5..0.5).contains(&x), "{x} outside [-1.5, 0.5)");
    }
}

#[rstest]
fn same_seed_repeats_results(seeded: SeededEntropy) {
    let first = evaluate(&seeded, "int", json!({"max": 1_000_000}));
    let second = evaluate(&seeded, "int", json!({"max": 1_000_000}));
    assert_eq!(first, second);
}

#[rstest]
fn bool_is_tagged_bool(seeded: SeededEntropy) {
    let (value, tag) = evaluate(&seeded, "bool", json!({}));
    assert!(value.is_boolean());
    assert_eq!(tag, TypeTag::Bool);
}

#[rstest]
fn choice_returns_a_member_tagged_string() {
    let items = json!(["red", 2, {"k": "v"}]);
    let members = items.as_array().cloned().expect("array");
    let mut seen = HashSet::new();
    for seed in 0..32 {
        let entropy = SeededEntropy::new(seed);
        let (value, tag) = evaluate(&entropy, "choice", json!({"items": items}));
        assert_eq!(tag, TypeTag::String);
        assert!(members.contains(&value));
        seen.insert(value.to_string());
    }
    assert!(seen.len() > 1, "choice never varied");
}

#[rstest]
#[case::default(json!({}), 32)]
#[case::one(json!({"size": 1}), 2)]
#[case::max(json!({"size": 1024}), 2048)]
fn bytes_are_lowercase_hex(seeded: SeededEntropy, #[case] params: Value, #[case] len: usize) {
    let (value, tag) = evaluate(&seeded, "bytes", params);
    let encoded = value.as_str().expect("string");
    assert_eq!(tag, TypeTag::String);
    assert_eq!(encoded.len(), len);
    assert!(encoded.chars().all(|ch| matches!(ch, '0'..='9' | 'a'..='f')));
}

#[rstest]
#[case::int_equal("int", json!({"min": 3, "max": 3}), "min must be less than max")]
#[case::int_inverted("int", json!({"min": 9, "max": 3}), "min must be less than max")]
#[case::float_inverted("float", json!({"min": 1.0, "max": 0.5}), "min must be less than max")]
#[case::bytes_zero("bytes", json!({"size": 0}), "size must be between 1 and 1024")]
#[case::bytes_large("bytes", json!({"size": 1025}), "size must be between 1 and 1024")]
fn invalid_ranges_are_rejected(
    #[case] function: &str,
    #[case] params: Value,
    #[case] message: &str,
) {
    assert_eq!(
        failure(function, params),
        (message.to_owned(), ErrorKind::InvalidParameter)
    );
}

#[rstest]
#[case::absent(json!({}))]
#[case::empty(json!({"items": []}))]
fn choice_requires_items(#[case] params: Value) {
    assert_eq!(
        failure("choice", params),
        (
            "items parameter required and must be non-empty list".to_owned(),
            ErrorKind::MissingParameter
        )
    );
}

#[test]
fn validation_happens_before_drawing_entropy() {
    let mut entropy = MockEntropySource::new();
    entropy.expect_rng().never();
    let error = call(&TABLE, &entropy, "int", json!({"min": 2, "max": 1}))
        .expect_err("invalid range");
    assert_eq!(error.to_string(), "min must be less than max");
}

#[test]
fn entropy_failures_are_reported() {
    let mut entropy = MockEntropySource::new();
    entropy.expect_rng().times(1).returning(|| {
        Err(OperationError::io(
            "failed to seed random source",
            std::io::Error::other("unavailable"),
        ))
    });
    let error = call(&TABLE, &entropy, "bool", json!({}))
        .expect_err("seeding fails");
    assert_eq!(error.kind(), ErrorKind::Io);
    assert_eq!(
        error.to_string(),
        "failed to seed random source: unavailable"
    );
}
