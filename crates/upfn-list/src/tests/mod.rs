//! Unit and BDD tests for the sequence operations.

use rstest::rstest;
use serde_json::{Value, json};
use upfn_protocol::test_support::{call, mapping};
use upfn_protocol::{ErrorKind, Request, TypeTag};

use crate::TABLE;


fn evaluate(function: &str, params: Value) -> (Value, TypeTag) {
    let (value, tag) = call(&TABLE, &(), function, params)
        .expect("operation succeeds")
        .into_parts();
    (Value::from(value), tag)
}

fn failure(function: &str, params: Value) -> (String, ErrorKind) {
    let error = call(&TABLE, &(), function, params).expect_err("operation fails");
    (error.to_string(), error.kind())
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_substitutes_self_fields() {
    let template = json!({
        "name": "item",
        "number": "$self.number",
        "index": "$self.index",
        "count": "$self.count",
        "first": "$self.first",
        "last": "$self.last"
    });
    let (value, tag) = evaluate("generate", json!({"count": 2, "template": template}));
    assert_eq!(tag, TypeTag::List);
    assert_eq!(
        value,
        json!([
            {"name": "item", "number": 1, "index": 0, "count": 2, "first": true, "last": false},
            {"name": "item", "number": 2, "index": 1, "count": 2, "first": false, "last": true}
        ])
    );
}

#[test]
fn generate_resolves_context_references() {
    let request = Request::new("generate")
        .with_params(mapping(json!({
            "count": 1,
            "template": ["$context.env", "$context.missing", "$self.unknown"]
        })))
        .with_context(mapping(json!({"env": "prod"})));
    let (value, _) = TABLE
        .dispatch(&request, &())
        .expect("generate succeeds")
        .into_parts();
    assert_eq!(
        Value::from(value),
        json!([["prod", "$context.missing", "$self.unknown"]])
    );
}

#[test]
fn generate_copies_plain_templates() {
    let (value, _) = evaluate("generate", json!({"count": 3, "template": "x"}));
    assert_eq!(value, json!(["x", "x", "x"]));
}

#[rstest]
#[case::zero(json!({"count": 0, "template": 1}), "count parameter required and must be positive")]
#[case::negative(json!({"count": -2, "template": 1}), "count parameter required and must be positive")]
#[case::missing_template(json!({"count": 2}), "template parameter required")]
#[case::too_many(json!({"count": 10_001, "template": 1}), "count too large (max 10000)")]
fn generate_validates_parameters(#[case] params: Value, #[case] message: &str) {
    assert_eq!(failure("generate", params).0, message);
}

#[test]
fn generate_accepts_a_null_template() {
    let (value, _) = evaluate("generate", json!({"count": 2, "template": null}));
    assert_eq!(value, json!([null, null]));
}

// ---------------------------------------------------------------------------
// join, slice, length, contains, index
// ---------------------------------------------------------------------------

#[rstest]
#[case::default_separator(json!({"items": ["a", "b", "c"]}), "a,b,c")]
#[case::custom_separator(json!({"items": [1, 2.5, true], "separator": " | "}), "1 | 2.5 | true")]
#[case::nested(json!({"items": [[1, 2], {"k": "v"}]}), "[1,2],{\"k\":\"v\"}")]
#[case::empty(json!({"items": []}), "")]
#[case::integral_float(json!({"items": [1.0, 2.5]}), "1,2.5")]
fn join_renders_plain_text(#[case] params: Value, #[case] expected: &str) {
    assert_eq!(evaluate("join", params), (json!(expected), TypeTag::String));
}

#[rstest]
#[case::start_past_end(json!({"items": [1, 2, 3], "start": 5}), json!([]))]
#[case::inverted(json!({"items": [1, 2, 3], "start": 2, "end": 0}), json!([]))]
#[case::middle(json!({"items": [1, 2, 3], "start": 1, "end": 2}), json!([2]))]
#[case::defaults(json!({"items": [1, 2, 3]}), json!([1, 2, 3]))]
#[case::negative_start(json!({"items": [1, 2, 3], "start": -1, "end": 2}), json!([1, 2]))]
#[case::end_clamped(json!({"items": [1, 2, 3], "end": 10}), json!([1, 2, 3]))]
fn slice_clamps_bounds(#[case] params: Value, #[case] expected: Value) {
    assert_eq!(evaluate("slice", params), (expected, TypeTag::List));
}

#[test]
fn length_counts_elements() {
    assert_eq!(
        evaluate("length", json!({"items": [null, 1, "a"]})),
        (json!(3), TypeTag::Int)
    );
}

#[rstest]
#[case::text_matches_number(json!({"items": [1, 2], "value": "2"}), true)]
#[case::string(json!({"items": ["a", "b"], "value": "b"}), true)]
#[case::absent(json!({"items": ["a"], "value": "z"}), false)]
#[case::integral_float_value(json!({"items": [1], "value": 1.0}), true)]
#[case::integral_float_item(json!({"items": [3.0], "value": 3}), true)]
fn contains_compares_plain_text(#[case] params: Value, #[case] expected: bool) {
    assert_eq!(evaluate("contains", params), (json!(expected), TypeTag::Bool));
}

#[test]
fn contains_requires_a_value() {
    assert_eq!(
        failure("contains", json!({"items": []})),
        ("value parameter required".to_owned(), ErrorKind::MissingParameter)
    );
}

#[test]
fn index_returns_element_tagged_string() {
    assert_eq!(
        evaluate("index", json!({"items": [10, 20], "index": 1})),
        (json!(20), TypeTag::String)
    );
}

#[rstest]
#[case::negative(-1)]
#[case::past_end(2)]
fn index_out_of_range_fails(#[case] position: i64) {
    assert_eq!(
        failure("index", json!({"items": [10, 20], "index": position})),
        ("index out of range".to_owned(), ErrorKind::InvalidParameter)
    );
}

#[rstest]
#[case::join("join")]
#[case::slice("slice")]
#[case::length("length")]
#[case::contains("contains")]
#[case::index("index")]
fn items_must_be_a_list(#[case] function: &str) {
    assert_eq!(
        failure(function, json!({"items": "a,b"})),
        (
            "items parameter required and must be a list".to_owned(),
            ErrorKind::MissingParameter
        )
    );
}
