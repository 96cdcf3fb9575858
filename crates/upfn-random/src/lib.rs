//! Random value provider.
//!
//! Every call draws from a generator obtained from the [`EntropySource`]
//! backend, so the binary uses fresh OS-seeded state per process while tests
//! substitute a fixed seed.

#[cfg(test)]
mod tests;

use rand::Rng;
use rand::seq::SliceRandom;
use upfn_protocol::{
    DynamicValue, EntropySource, Evaluated, Invocation, Operation, OperationError,
    OperationResult, OperationTable, TypeTag,
};

/// Inclusive bounds on the `size` parameter of `bytes`.
pub const BYTE_SIZE_RANGE: std::ops::RangeInclusive<i64> = 1..=1024;

type Call<'a> = Invocation<'a, dyn EntropySource>;

/// Operations served by the `random` provider.
pub const TABLE: OperationTable<dyn EntropySource> = OperationTable::new(
    "random",
    &[
        Operation::new("int", int),
        Operation::new("float", float),
        Operation::new("bool", boolean),
        Operation::new("choice", choice),
        Operation::new("bytes", bytes),
    ],
);

fn ordered_range() -> OperationError {
    OperationError::invalid("min must be less than max")
}

/// Uniform integer in `[min, max)`.
fn int(call: &Call<'_>) -> OperationResult {
    let params = call.params();
    let min = params.get_i64("min", 0);
    let max = params.get_i64("max", 100);
    if min >= max {
        return Err(ordered_range());
    }
    let mut rng = call.backend().rng()?;
    Ok(Evaluated::int(rng.gen_range(min..max)))
}

/// Uniform float in `[min, max)`.
#[expect(clippy::float_arithmetic, reason = "range width must stay finite")]
fn float(call: &Call<'_>) -> OperationResult {
    let params = call.params();
    let min = params.get_f64("min", 0.0);
    let max = params.get_f64("max", 1.0);
    if min >= max {
        return Err(ordered_range());
    }
    if !(max - min).is_finite() {
        return Err(OperationError::invalid("range is too wide"));
    }
    let mut rng = call.backend().rng()?;
    Evaluated::float(rng.gen_range(min..max))
}

fn boolean(call: &Call<'_>) -> OperationResult {
    let mut rng = call.backend().rng()?;
    Ok(Evaluated::bool(rng.r#gen()))
}

/// Picks one element; the tag is advisory and always `string`.
fn choice(call: &Call<'_>) -> OperationResult {
    let items = call.params().non_empty_list("items")?;
    let mut rng = call.backend().rng()?;
    items
        .choose(&mut rng)
        .map(|item| Evaluated::new(DynamicValue::clone(item), TypeTag::String))
        .ok_or_else(|| OperationError::shape("items", "non-empty list"))
}

/// Lowercase hex encoding of `size` random bytes.
fn bytes(call: &Call<'_>) -> OperationResult {
    let size = call.params().get_i64("size", 16);
    let len = usize::try_from(size)
        .ok()
        .filter(|_| BYTE_SIZE_RANGE.contains(&size))
        .ok_or_else(|| OperationError::invalid("size must be between 1 and 1024"))?;
    let mut rng = call.backend().rng()?;
    let mut buffer = vec![0_u8; len];
    rng.fill(buffer.as_mut_slice());
    Ok(Evaluated::string(hex::encode(buffer)))
}
