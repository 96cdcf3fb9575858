//! Identifier provider.
//!
//! Identifiers combine the current time with random bits. Both come from the
//! [`Generators`] backend so tests can pin the clock and the seed.


use std::time::UNIX_EPOCH;

use rand::Rng;
use rand::rngs::StdRng;
use ulid::Ulid;
use upfn_protocol::{
    Clock, DynamicValue, EntropySource, Evaluated, Invocation, Operation, OperationError,
    OperationResult, OperationTable, OsEntropy, SystemClock,
};
use uuid::Builder;

/// Alphabet used by `nanoid` when none is supplied.
pub const NANOID_ALPHABET: &str =
    "_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Inclusive bounds on the `size` parameter of `nanoid`.
pub const NANOID_SIZE_RANGE: std::ops::RangeInclusive<i64> = 1..=1024;

const SNOWFLAKE_WORKER_MASK: i64 = 0x3FF;
const SNOWFLAKE_SEQUENCE_MASK: i64 = 0xFFF;

/// Clock and entropy shared by the identifier operations.
pub struct Generators {
    clock: Box<dyn Clock>,
    entropy: Box<dyn EntropySource>,
}

impl Generators {
    /// Combines a clock with an entropy source.
    #[must_use]
    pub fn new(clock: impl Clock + 'static, entropy: impl EntropySource + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            entropy: Box::new(entropy),
        }
    }

    /// Uses the system clock and OS-seeded randomness.
    #[must_use]
    pub fn system() -> Self {
        Self::new(SystemClock, OsEntropy)
    }

    fn rng(&self) -> Result<StdRng, OperationError> {
        self.entropy.rng()
    }

    /// Milliseconds since the Unix epoch; instants before it count as zero.
    fn unix_millis(&self) -> u64 {
        let elapsed = self
            .clock
            .now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

type Call<'a> = Invocation<'a, Generators>;

/// Operations served by the `id` provider.
pub const TABLE: OperationTable<Generators> = OperationTable::new(
    "id",
    &[
        Operation::new("uuid", uuid),
        Operation::new("uuid4", uuid),
        Operation::new("ulid", ulid),
        Operation::new("nanoid", nanoid),
        Operation::new("snowflake", snowflake),
    ],
);

/// Random (version 4) UUID in hyphenated lowercase form.
fn uuid(call: &Call<'_>) -> OperationResult {
    let bytes: [u8; 16] = call.backend().rng()?.r#gen();
    let id = Builder::from_random_bytes(bytes).into_uuid();
    Ok(Evaluated::uuid(id.hyphenated().to_string()))
}

/// 48-bit millisecond timestamp followed by 80 random bits, Crockford base32.
fn ulid(call: &Call<'_>) -> OperationResult {
    let generators = call.backend();
    let random: u128 = generators.rng()?.r#gen();
    let id = Ulid::from_parts(generators.unix_millis(), random);
    Ok(Evaluated::string(id.to_string()))
}

fn nanoid(call: &Call<'_>) -> OperationResult {
    let params = call.params();
    let size = params.get_i64("size", 21);
    let len = usize::try_from(size)
        .ok()
        .filter(|_| NANOID_SIZE_RANGE.contains(&size))
        .ok_or_else(|| OperationError::invalid("size must be between 1 and 1024"))?;
    let alphabet: Vec<char> = params.get_str("alphabet", NANOID_ALPHABET).chars().collect();
    if alphabet.is_empty() {
        return Err(OperationError::invalid("alphabet must not be empty"));
    }

    let mut rng = call.backend().rng()?;
    let id: String = (0..len)
        .filter_map(|_| alphabet.get(rng.gen_range(0..alphabet.len())))
        .collect();
    Ok(Evaluated::string(id))
}

/// `timestamp << 22 | worker << 12 | sequence`, with worker and sequence
/// masked to 10 and 12 bits.
fn snowflake(call: &Call<'_>) -> OperationResult {
    let generators = call.backend();
    let params = call.params();
    let worker = params.get_i64("worker", 0) & SNOWFLAKE_WORKER_MASK;
    let sequence = match params.get("sequence").and_then(DynamicValue::as_i64) {
        Some(explicit) => explicit,
        None => generators.rng()?.gen_range(0..=SNOWFLAKE_SEQUENCE_MASK),
    };
    let millis = i64::try_from(generators.unix_millis()).unwrap_or(i64::MAX);
    Ok(Evaluated::int(
        (millis << 22) | (worker << 12) | (sequence & SNOWFLAKE_SEQUENCE_MASK),
    ))
}
