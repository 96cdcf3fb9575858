//! Fake data provider.
//!
//! Values come from the `fake` crate's English fakers, plus a few word lists
//! in [`catalog`]. Each call draws from the [`EntropySource`] backend unless
//! the request carries a numeric `seed`, in which case the output is fully
//! determined by that seed.

#[cfg(test)]
mod tests;

pub mod catalog;

use std::ops::RangeInclusive;

use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, StateAbbr, StateName, StreetName, ZipCode,
};
use fake::faker::company::en::CompanyName;
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::currency::en::CurrencyName;
use fake::faker::internet::en::{DomainSuffix, IPv4, IPv6, SafeEmail, UserAgent, Username};
use fake::faker::job::en::Title;
use fake::faker::lorem::en::{Paragraph, Sentence, Word, Words};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::{Dummy, Fake};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use upfn_protocol::{
    DynamicValue, EntropySource, Evaluated, Invocation, Operation, OperationError,
    OperationResult, OperationTable,
};

/// Accepted values of the `words` parameter.
pub const WORD_COUNT_RANGE: RangeInclusive<i64> = 1..=1000;

/// Accepted values of the `sentences` parameter.
pub const SENTENCE_COUNT_RANGE: RangeInclusive<i64> = 1..=100;

type Call<'a> = Invocation<'a, dyn EntropySource>;

/// Operations served by the `fake` provider.
pub const TABLE: OperationTable<dyn EntropySource> = OperationTable::new(
    "fake",
    &[
        Operation::new("name", name),
        Operation::new("firstName", first_name),
        Operation::new("lastName", last_name),
        Operation::new("email", email),
        Operation::new("phone", phone),
        Operation::new("username", username),
        Operation::new("url", url),
        Operation::new("domain", domain),
        Operation::new("ipv4", ipv4),
        Operation::new("ipv6", ipv6),
        Operation::new("userAgent", user_agent),
        Operation::new("company", company),
        Operation::new("jobTitle", job_title),
        Operation::new("address", address),
        Operation::new("city", city),
        Operation::new("state", state),
        Operation::new("country", country),
        Operation::new("zipCode", zip_code),
        Operation::new("latitude", latitude),
        Operation::new("longitude", longitude),
        Operation::new("word", word),
        Operation::new("sentence", sentence),
        Operation::new("paragraph", paragraph),
        Operation::new("lorem", lorem),
        Operation::new("product", product),
        Operation::new("price", price),
        Operation::new("currency", currency),
        Operation::new("color", color),
        Operation::new("hexColor", hex_color),
        Operation::new("creditCard", credit_card),
    ],
);

/// Generator for this call, seeded by the `seed` parameter when present.
fn generator(call: &Call<'_>) -> Result<StdRng, OperationError> {
    call.params()
        .get("seed")
        .and_then(DynamicValue::as_i64)
        .map_or_else(
            || call.backend().rng(),
            |seed| Ok(StdRng::seed_from_u64(seed.cast_unsigned())),
        )
}

fn faked<F>(call: &Call<'_>, faker: &F) -> OperationResult
where
    String: Dummy<F>,
{
    let mut rng = generator(call)?;
    Ok(Evaluated::string(faker.fake_with_rng::<String, _>(&mut rng)))
}

fn pick(rng: &mut StdRng, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Reads a count parameter and checks it against `range`.
fn count(
    call: &Call<'_>,
    key: &str,
    default: i64,
    range: &RangeInclusive<i64>,
) -> Result<usize, OperationError> {
    let value = call.params().get_i64(key, default);
    usize::try_from(value)
        .ok()
        .filter(|_| range.contains(&value))
        .ok_or_else(|| {
            OperationError::invalid(format!(
                "{key} must be between {} and {}",
                range.start(),
                range.end()
            ))
        })
}

fn domain_name(rng: &mut StdRng) -> String {
    let label: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    format!("{}.{suffix}", label.to_lowercase())
}

// ---------------------------------------------------------------------------
// People and internet
// ---------------------------------------------------------------------------

fn name(call: &Call<'_>) -> OperationResult {
    faked(call, &Name())
}

fn first_name(call: &Call<'_>) -> OperationResult {
    faked(call, &FirstName())
}

fn last_name(call: &Call<'_>) -> OperationResult {
    faked(call, &LastName())
}

fn email(call: &Call<'_>) -> OperationResult {
    faked(call, &SafeEmail())
}

fn phone(call: &Call<'_>) -> OperationResult {
    faked(call, &PhoneNumber())
}

fn username(call: &Call<'_>) -> OperationResult {
    faked(call, &Username())
}

fn url(call: &Call<'_>) -> OperationResult {
    let mut rng = generator(call)?;
    Ok(Evaluated::string(format!("https://www.{}/", domain_name(&mut rng))))
}

fn domain(call: &Call<'_>) -> OperationResult {
    let mut rng = generator(call)?;
    Ok(Evaluated::string(domain_name(&mut rng)))
}

fn ipv4(call: &Call<'_>) -> OperationResult {
    faked(call, &IPv4())
}

fn ipv6(call: &Call<'_>) -> OperationResult {
    faked(call, &IPv6())
}

fn user_agent(call: &Call<'_>) -> OperationResult {
    faked(call, &UserAgent())
}

fn company(call: &Call<'_>) -> OperationResult {
    faked(call, &CompanyName())
}

fn job_title(call: &Call<'_>) -> OperationResult {
    faked(call, &Title())
}

// ---------------------------------------------------------------------------
// Places
// ---------------------------------------------------------------------------

/// Single-line US-style street address.
fn address(call: &Call<'_>) -> OperationResult {
    let mut rng = generator(call)?;
    let number: String = BuildingNumber().fake_with_rng(&mut rng);
    let street: String = StreetName().fake_with_rng(&mut rng);
    let city: String = CityName().fake_with_rng(&mut rng);
    let state: String = StateAbbr().fake_with_rng(&mut rng);
    let zip: String = ZipCode().fake_with_rng(&mut rng);
    Ok(Evaluated::string(format!(
        "{number} {street}, {city}, {state} {zip}"
    )))
}

fn city(call: &Call<'_>) -> OperationResult {
    faked(call, &CityName())
}

fn state(call: &Call<'_>) -> OperationResult {
    faked(call, &StateName())
}

fn country(call: &Call<'_>) -> OperationResult {
    faked(call, &CountryName())
}

fn zip_code(call: &Call<'_>) -> OperationResult {
    faked(call, &ZipCode())
}

fn latitude(call: &Call<'_>) -> OperationResult {
    Evaluated::float(generator(call)?.gen_range(-90.0..=90.0))
}

fn longitude(call: &Call<'_>) -> OperationResult {
    Evaluated::float(generator(call)?.gen_range(-180.0..=180.0))
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

fn word(call: &Call<'_>) -> OperationResult {
    faked(call, &Word())
}

fn sentence(call: &Call<'_>) -> OperationResult {
    let words = count(call, "words", 10, &WORD_COUNT_RANGE)?;
    faked(call, &Sentence(words..words.saturating_add(1)))
}

fn paragraph(call: &Call<'_>) -> OperationResult {
    let sentences = count(call, "sentences", 3, &SENTENCE_COUNT_RANGE)?;
    faked(call, &Paragraph(sentences..sentences.saturating_add(1)))
}

/// Exactly `words` lorem words separated by spaces.
fn lorem(call: &Call<'_>) -> OperationResult {
    let words = count(call, "words", 50, &WORD_COUNT_RANGE)?;
    let mut rng = generator(call)?;
    let text: Vec<String> = Words(words..words.saturating_add(1)).fake_with_rng(&mut rng);
    Ok(Evaluated::string(text.join(" ")))
}

// ---------------------------------------------------------------------------
// Commerce
// ---------------------------------------------------------------------------

fn product(call: &Call<'_>) -> OperationResult {
    let mut rng = generator(call)?;
    let adjective = pick(&mut rng, catalog::PRODUCT_ADJECTIVES);
    let material = pick(&mut rng, catalog::PRODUCT_MATERIALS);
    let noun = pick(&mut rng, catalog::PRODUCT_NOUNS);
    Ok(Evaluated::string(format!("{adjective} {material} {noun}")))
}

/// Price in `[min, max]` with two decimal places.
///
/// Bounds are whole currency units; fractional bounds are truncated.
fn price(call: &Call<'_>) -> OperationResult {
    let params = call.params();
    let min = params.get_i64("min", 1);
    let max = params.get_i64("max", 1000);
    if min >= max {
        return Err(OperationError::invalid("min must be less than max"));
    }
    let too_wide = || OperationError::invalid("price range is too wide");
    let low = min.checked_mul(100).ok_or_else(too_wide)?;
    let high = max.checked_mul(100).ok_or_else(too_wide)?;

    let cents = generator(call)?.gen_range(low..=high);
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let text = format!(
        "{sign}{}.{:02}",
        magnitude.div_euclid(100),
        magnitude.rem_euclid(100)
    );
    let value = text
        .parse::<f64>()
        .map_err(|error| OperationError::invalid(format!("invalid price {text}: {error}")))?;
    Evaluated::float(value)
}

fn currency(call: &Call<'_>) -> OperationResult {
    faked(call, &CurrencyName())
}

fn color(call: &Call<'_>) -> OperationResult {
    let mut rng = generator(call)?;
    Ok(Evaluated::string(pick(&mut rng, catalog::COLOR_NAMES)))
}

/// `#rrggbb` in lowercase.
fn hex_color(call: &Call<'_>) -> OperationResult {
    let rgb: u32 = generator(call)?.gen_range(0..=0x00FF_FFFF);
    Ok(Evaluated::string(format!("#{rgb:06x}")))
}

/// Card number; the `type` parameter is ignored.
fn credit_card(call: &Call<'_>) -> OperationResult {
    faked(call, &CreditCardNumber())
}
