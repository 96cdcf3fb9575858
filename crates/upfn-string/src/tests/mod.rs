//! Unit tests for the text operations.

use rstest::rstest;
use serde_json::{Value, json};
use upfn_protocol::test_support::call;
use upfn_protocol::{ErrorKind, TypeTag};

use crate::{TABLE, title_case};


fn evaluate(function: &str, params: Value) -> (Value, TypeTag) {
    let (value, tag) = call(&TABLE, &(), function, params)
        .expect("operation succeeds")
        .into_parts();
    (Value::from(value), tag)
}

fn text(function: &str, params: Value) -> String {
    match evaluate(function, params) {
        (Value::String(result), TypeTag::String) => result,
        other => panic!("expected a string result, got {other:?}"),
    }
}

fn failure(function: &str, params: Value) -> (String, ErrorKind) {
    let error = call(&TABLE, &(), function, params).expect_err("operation fails");
    (error.to_string(), error.kind())
}

// ---------------------------------------------------------------------------
// Case and trimming
// ---------------------------------------------------------------------------

#[rstest]
#[case::upper("upper", "héllo", "HÉLLO")]
#[case::lower("lower", "ÀBC", "àbc")]
#[case::title("title", "hello wide-world", "Hello Wide-World")]
#[case::trim("trim", "\t padded \n", "padded")]
#[case::reverse("reverse", "añb", "bña")]
fn single_argument_transforms(#[case] function: &str, #[case] input: &str, #[case] expected: &str) {
    assert_eq!(text(function, json!({"s": input})), expected);
}

#[test]
fn title_case_leaves_inner_letters_alone() {
    assert_eq!(title_case("mIxEd case"), "MIxEd Case");
}

#[rstest]
#[case::underscore("foo_bar", "Foo_bar")]
#[case::digits("2nd place", "2nd Place")]
#[case::punctuation("it's a.b", "It'S A.B")]
#[case::non_ascii_space("élan\u{3000}vital", "Élan\u{3000}Vital")]
#[case::non_ascii_symbol("a→b", "A→b")]
fn title_case_splits_words_on_separators(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(title_case(input), expected);
}

#[test]
fn trim_honours_custom_cutset() {
    assert_eq!(text("trim", json!({"s": "xxhixx", "cutset": "x"})), "hi");
}

#[rstest]
#[case::prefix_present("trimPrefix", json!({"s": "v1.2", "prefix": "v"}), "1.2")]
#[case::prefix_absent("trimPrefix", json!({"s": "1.2", "prefix": "v"}), "1.2")]
#[case::suffix_present("trimSuffix", json!({"s": "file.txt", "suffix": ".txt"}), "file")]
fn affix_trimming(#[case] function: &str, #[case] params: Value, #[case] expected: &str) {
    assert_eq!(text(function, params), expected);
}

// ---------------------------------------------------------------------------
// Splitting, joining, replacing
// ---------------------------------------------------------------------------

#[rstest]
#[case::default_separator(json!({"s": "a,b,,c"}), json!(["a", "b", "", "c"]))]
#[case::custom_separator(json!({"s": "a::b", "sep": "::"}), json!(["a", "b"]))]
#[case::characters(json!({"s": "añ", "sep": ""}), json!(["a", "ñ"]))]
fn split_produces_a_list(#[case] params: Value, #[case] expected: Value) {
    assert_eq!(evaluate("split", params), (expected, TypeTag::List));
}

#[test]
fn join_does_not_require_s() {
    assert_eq!(text("join", json!({"items": ["a", 1, true], "sep": "-"})), "a-1-true");
}

#[test]
fn join_renders_integral_floats_as_integers() {
    assert_eq!(text("join", json!({"items": [1.0, 2.5], "sep": ","})), "1,2.5");
}

#[rstest]
#[case::first_only(json!({"s": "aaa", "old": "a", "new": "b"}), "baa")]
#[case::two(json!({"s": "aaa", "old": "a", "new": "b", "n": 2}), "bba")]
#[case::all(json!({"s": "aaa", "old": "a", "new": "b", "n": -1}), "bbb")]
#[case::none(json!({"s": "aaa", "old": "a", "new": "b", "n": 0}), "aaa")]
#[case::delete(json!({"s": "a-b", "old": "-"}), "ab")]
fn replace_honours_limit(#[case] params: Value, #[case] expected: &str) {
    assert_eq!(text("replace", params), expected);
}

#[test]
fn replace_all_replaces_every_match() {
    assert_eq!(
        text("replaceAll", json!({"s": "a.b.c", "old": ".", "new": "/"})),
        "a/b/c"
    );
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

#[rstest]
#[case::contains("contains", json!({"s": "haystack", "substr": "st"}), true)]
#[case::missing("contains", json!({"s": "haystack", "substr": "x"}), false)]
#[case::has_prefix("hasPrefix", json!({"s": "haystack", "prefix": "hay"}), true)]
#[case::has_suffix("hasSuffix", json!({"s": "haystack", "suffix": "hay"}), false)]
fn predicates_return_booleans(
    #[case] function: &str,
    #[case] params: Value,
    #[case] expected: bool,
) {
    assert_eq!(evaluate(function, params), (json!(expected), TypeTag::Bool));
}

// ---------------------------------------------------------------------------
// Slicing, repeating, length
// ---------------------------------------------------------------------------

#[rstest]
#[case::middle(json!({"s": "héllo", "start": 1, "end": 3}), "él")]
#[case::start_only(json!({"s": "héllo", "start": 3}), "lo")]
#[case::past_end(json!({"s": "abc", "start": 5}), "")]
#[case::inverted(json!({"s": "abc", "start": 2, "end": 0}), "")]
fn slice_counts_characters(#[case] params: Value, #[case] expected: &str) {
    assert_eq!(text("slice", params), expected);
}

#[rstest]
#[case::default(json!({"s": "ab"}), "ab")]
#[case::three(json!({"s": "ab", "count": 3}), "ababab")]
#[case::zero(json!({"s": "ab", "count": 0}), "")]
fn repeat_concatenates(#[case] params: Value, #[case] expected: &str) {
    assert_eq!(text("repeat", params), expected);
}

#[rstest]
#[case::negative(-1, "count must be non-negative")]
#[case::too_large(10_001, "count too large (max 10000)")]
fn repeat_bounds_count(#[case] count: i64, #[case] message: &str) {
    assert_eq!(
        failure("repeat", json!({"s": "ab", "count": count})),
        (message.to_owned(), ErrorKind::InvalidParameter)
    );
}

#[test]
fn length_counts_characters() {
    assert_eq!(evaluate("length", json!({"s": "añb"})), (json!(3), TypeTag::Int));
}

// ---------------------------------------------------------------------------
// Required parameters
// ---------------------------------------------------------------------------

#[rstest]
#[case::upper("upper", json!({}), "s parameter required")]
#[case::empty_s("length", json!({"s": ""}), "s parameter required")]
#[case::numeric_s("reverse", json!({"s": 12}), "s parameter required")]
#[case::prefix("trimPrefix", json!({"s": "x"}), "prefix parameter required")]
#[case::suffix("hasSuffix", json!({"s": "x", "suffix": ""}), "suffix parameter required")]
#[case::old("replace", json!({"s": "x"}), "old parameter required")]
#[case::substr("contains", json!({"s": "x"}), "substr parameter required")]
#[case::items("join", json!({}), "items parameter required and must be a list")]
fn missing_parameters_are_reported(
    #[case] function: &str,
    #[case] params: Value,
    #[case] message: &str,
) {
    assert_eq!(
        failure(function, params),
        (message.to_owned(), ErrorKind::MissingParameter)
    );
}
