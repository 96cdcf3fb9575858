//! Unit and BDD tests for the fake data operations.

use std::net::{Ipv4Addr, Ipv6Addr};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use upfn_protocol::test_support::{MockEntropySource, call};
use upfn_protocol::{EntropySource, ErrorKind, OperationError, SeededEntropy, TypeTag};

use crate::{TABLE, catalog};


#[fixture]
fn seeded() -> SeededEntropy {
    SeededEntropy::new(11)
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

fn text(entropy: &(dyn EntropySource + 'static), function: &str, params: Value) -> String {
    match evaluate(entropy, function, params) {
        (Value::String(text), TypeTag::String) => text,
        other => panic!("expected a string, got {other:?}"),
    }
}

fn number(entropy: &(dyn EntropySource + 'static), function: &str, params: Value) -> f64 {
    match evaluate(entropy, function, params) {
        (value, TypeTag::Float) => value.as_f64().expect("numeric"),
        other => panic!("expected a number, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[rstest]
#[case::name("name")]
#[case::email("email")]
#[case::address("address")]
#[case::sentence("sentence")]
#[case::product("product")]
#[case::price("price")]
#[case::hex_color("hexColor")]
#[case::credit_card("creditCard")]
fn seed_parameter_bypasses_the_backend(#[case] function: &str) {
    let mut entropy = MockEntropySource::new();
    entropy.expect_rng().never();
    let first = evaluate(&entropy, function, json!({"seed": 42}));
    let second = evaluate(&entropy, function, json!({"seed": 42}));
    assert_eq!(first, second);
}

#[test]
fn different_seeds_diverge() {
    let entropy = SeededEntropy::new(0);
    let outputs: Vec<String> = (0..8)
        .map(|seed| text(&entropy, "sentence", json!({"seed": seed})))
        .collect();
    assert!(outputs.iter().any(|output| Some(output) != outputs.first()));
}

#[test]
fn unseeded_calls_draw_from_the_backend() {
    let mut entropy = MockEntropySource::new();
    entropy
        .expect_rng()
        .times(1)
        .returning(|| Ok(StdRng::seed_from_u64(3)));
    assert!(!text(&entropy, "firstName", json!({})).is_empty());
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
    let error = call(&TABLE, &entropy, "word", json!({})).expect_err("seeding fails");
    assert_eq!(error.kind(), ErrorKind::Io);
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[rstest]
#[case::name("name")]
#[case::first_name("firstName")]
#[case::last_name("lastName")]
#[case::phone("phone")]
#[case::username("username")]
#[case::user_agent("userAgent")]
#[case::company("company")]
#[case::job_title("jobTitle")]
#[case::city("city")]
#[case::state("state")]
#[case::country("country")]
#[case::zip_code("zipCode")]
#[case::word("word")]
#[case::currency("currency")]
#[case::credit_card("creditCard")]
fn string_fakers_produce_text(seeded: SeededEntropy, #[case] function: &str) {
    assert!(!text(&seeded, function, json!({})).trim().is_empty());
}

#[rstest]
fn email_has_a_local_part_and_domain(seeded: SeededEntropy) {
    let email = text(&seeded, "email", json!({}));
    let (local, domain) = email.split_once('@').expect("an @ sign");
    assert!(!local.is_empty());
    assert!(domain.contains('.'), "{email}");
}

#[rstest]
fn addresses_parse(seeded: SeededEntropy) {
    text(&seeded, "ipv4", json!({}))
        .parse::<Ipv4Addr>()
        .expect("ipv4 address");
    text(&seeded, "ipv6", json!({}))
        .parse::<Ipv6Addr>()
        .expect("ipv6 address");
}

#[rstest]
fn urls_wrap_a_domain(seeded: SeededEntropy) {
    let url = text(&seeded, "url", json!({}));
    let host = url
        .strip_prefix("https://www.")
        .and_then(|rest| rest.strip_suffix('/'))
        .expect("https url");
    assert!(host.contains('.'), "{url}");
    let domain = text(&seeded, "domain", json!({}));
    assert_eq!(domain, domain.to_lowercase());
}

#[rstest]
fn street_addresses_have_three_parts(seeded: SeededEntropy) {
    let address = text(&seeded, "address", json!({}));
    assert_eq!(address.split(", ").count(), 3, "{address}");
}

#[rstest]
#[case::latitude("latitude", -90.0, 90.0)]
#[case::longitude("longitude", -180.0, 180.0)]
fn coordinates_stay_in_range(#[case] function: &str, #[case] low: f64, #[case] high: f64) {
    for seed in 0..32 {
        let value = number(&SeededEntropy::new(seed), function, json!({}));
        assert!((low..=high).contains(&value), "{value}");
    }
}

#[rstest]
fn colours_come_from_the_catalog(seeded: SeededEntropy) {
    let color = text(&seeded, "color", json!({}));
    assert!(catalog::COLOR_NAMES.contains(&color.as_str()), "{color}");
}

#[rstest]
fn hex_colours_are_six_lowercase_digits(seeded: SeededEntropy) {
    let color = text(&seeded, "hexColor", json!({}));
    let digits = color.strip_prefix('#').expect("leading #");
    assert_eq!(digits.len(), 6);
    assert!(
        digits
            .chars()
            .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch)),
        "{color}"
    );
}

#[rstest]
fn products_combine_catalog_words(seeded: SeededEntropy) {
    let product = text(&seeded, "product", json!({}));
    let words: Vec<&str> = product.split(' ').collect();
    assert!(matches!(
        words.as_slice(),
        [adjective, material, noun]
            if catalog::PRODUCT_ADJECTIVES.contains(adjective)
                && catalog::PRODUCT_MATERIALS.contains(material)
                && catalog::PRODUCT_NOUNS.contains(noun)
    ), "{product}");
}

#[test]
fn card_type_does_not_change_the_number() {
    let entropy = SeededEntropy::new(5);
    assert_eq!(
        text(&entropy, "creditCard", json!({"seed": 1, "type": "visa"})),
        text(&entropy, "creditCard", json!({"seed": 1}))
    );
}

// ---------------------------------------------------------------------------
// Text lengths
// ---------------------------------------------------------------------------

#[rstest]
#[case::sentence_default("sentence", json!({}), 10)]
#[case::sentence_custom("sentence", json!({"words": 4}), 4)]
#[case::lorem_default("lorem", json!({}), 50)]
#[case::lorem_custom("lorem", json!({"words": 7}), 7)]
fn word_counts_are_exact(
    seeded: SeededEntropy,
    #[case] function: &str,
    #[case] params: Value,
    #[case] expected: usize,
) {
    let output = text(&seeded, function, params);
    assert_eq!(output.split_whitespace().count(), expected, "{output}");
}

#[rstest]
#[case::default(json!({}), 3)]
#[case::custom(json!({"sentences": 5}), 5)]
fn paragraphs_hold_the_requested_sentences(
    seeded: SeededEntropy,
    #[case] params: Value,
    #[case] expected: usize,
) {
    let output = text(&seeded, "paragraph", params);
    assert_eq!(output.matches('.').count(), expected, "{output}");
}

#[rstest]
#[case::no_words("sentence", json!({"words": 0}), "words must be between 1 and 1000")]
#[case::too_many_words("lorem", json!({"words": 1001}), "words must be between 1 and 1000")]
#[case::no_sentences("paragraph", json!({"sentences": -1}), "sentences must be between 1 and 100")]
fn counts_are_bounded(
    seeded: SeededEntropy,
    #[case] function: &str,
    #[case] params: Value,
    #[case] message: &str,
) {
    let error = call(&TABLE, &seeded, function, params).expect_err("out of range");
    assert_eq!(error.kind(), ErrorKind::InvalidParameter);
    assert_eq!(error.to_string(), message);
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

#[rstest]
#[case::defaults(json!({}), 1.0, 1000.0)]
#[case::narrow(json!({"min": 5, "max": 6}), 5.0, 6.0)]
#[case::negative(json!({"min": -3, "max": -1}), -3.0, -1.0)]
fn prices_stay_within_bounds(#[case] params: Value, #[case] low: f64, #[case] high: f64) {
    for seed in 0..32 {
        let (value, tag) = evaluate(&SeededEntropy::new(seed), "price", params.clone());
        assert_eq!(tag, TypeTag::Float);
        let price = value.as_f64().expect("numeric");
        assert!((low..=high).contains(&price), "{price}");
        let rendered = value.to_string();
        let decimals = rendered.split_once('.').map_or(0, |(_, fraction)| fraction.len());
        assert!(decimals <= 2, "{rendered}");
    }
}

#[rstest]
#[case::equal(json!({"min": 5, "max": 5}))]
#[case::inverted(json!({"min": 10, "max": 2}))]
fn price_rejects_empty_ranges(seeded: SeededEntropy, #[case] params: Value) {
    let error = call(&TABLE, &seeded, "price", params).expect_err("empty range");
    assert_eq!(error.to_string(), "min must be less than max");
}
