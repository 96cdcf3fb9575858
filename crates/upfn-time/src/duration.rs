//! Go-style duration expressions.
//!
//! An expression is an optional sign followed by one or more
//! `<number><unit>` terms, for example `300ms`, `1h30m` or `-1.5h`. Rendering
//! produces the same shape, always spelling out minutes and seconds once an
//! hour is present (`1h0m0s`).

use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Magnitude of the most negative representable duration.
const MAX_NEGATIVE_NANOS: u64 = 1 << 63;

/// Why a duration expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// The expression is malformed or out of range.
    #[error("invalid duration {0:?}")]
    Invalid(String),
    /// A number was not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),
    /// A unit suffix is not recognised.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The unrecognised suffix.
        unit: String,
        /// The whole expression.
        input: String,
    },
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parses an expression into signed nanoseconds.
///
/// # Errors
///
/// Returns a [`DurationError`] when the expression is empty, malformed, uses
/// an unknown unit, or does not fit in 64 bits of nanoseconds.
///
/// # Example
///
/// ```
/// use upfn_time::duration::parse;
///
/// assert_eq!(parse("1h30m"), Ok(5_400_000_000_000));
/// assert_eq!(parse("-1.5s"), Ok(-1_500_000_000));
/// ```
pub fn parse(input: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid(input.to_owned());

    let (negative, mut rest) = input.strip_prefix('-').map_or_else(
        || (false, input.strip_prefix('+').unwrap_or(input)),
        |tail| (true, tail),
    );
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_fraction) = after_whole
            .strip_prefix('.')
            .map_or(("", after_whole), split_digits);
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_len = after_fraction
            .find(|ch: char| ch == '.' || ch.is_ascii_digit())
            .unwrap_or(after_fraction.len());
        let (unit, tail) = after_fraction.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_owned()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_owned(),
            input: input.to_owned(),
        })?;

        let term = term_nanos(whole, fraction, scale).ok_or_else(invalid)?;
        total = total.checked_add(term).ok_or_else(invalid)?;
        rest = tail;
    }

    if negative {
        if total > MAX_NEGATIVE_NANOS {
            return Err(invalid());
        }
        Ok(i64::try_from(total).map_or(i64::MIN, |magnitude| -magnitude))
    } else {
        i64::try_from(total).map_err(|_| invalid())
    }
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Nanoseconds contributed by `<whole>.<fraction><unit>`.
fn term_nanos(whole: &str, fraction: &str, scale: u64) -> Option<u64> {
    let mut nanos: u64 = 0;
    for digit in whole.bytes() {
        nanos = nanos
            .checked_mul(10)?
            .checked_add(u64::from(digit - b'0'))?;
    }
    nanos = nanos.checked_mul(scale)?;

    let mut numerator: u64 = 0;
    let mut denominator: u64 = 1;
    for digit in fraction.bytes() {
        let (Some(next_numerator), Some(next_denominator)) = (
            numerator.checked_mul(10).and_then(|n| n.checked_add(u64::from(digit - b'0'))),
            denominator.checked_mul(10),
        ) else {
            break;
        };
        numerator = next_numerator;
        denominator = next_denominator;
    }
    let partial = u128::from(numerator)
        .checked_mul(u128::from(scale))?
        .checked_div(u128::from(denominator))?;
    nanos.checked_add(u64::try_from(partial).ok()?)
}

/// Renders signed nanoseconds as an expression.
///
/// Durations under a second use the largest fitting sub-second unit;
/// anything longer is spelled as hours, minutes and seconds.
///
/// # Example
///
/// ```
/// use upfn_time::duration::format;
///
/// assert_eq!(format(5_400_000_000_000), "1h30m0s");
/// assert_eq!(format(1_500_000), "1.5ms");
/// assert_eq!(format(0), "0s");
/// ```
#[must_use]
pub fn format(nanos: i128) -> String {
    let sign = if nanos < 0 { "-" } else { "" };
    let magnitude = nanos.unsigned_abs();
    if magnitude == 0 {
        return String::from("0s");
    }

    let micro = u128::from(NANOS_PER_MICRO);
    let milli = u128::from(NANOS_PER_MILLI);
    let second = u128::from(NANOS_PER_SECOND);
    if magnitude < micro {
        return format!("{sign}{magnitude}ns");
    }
    if magnitude < milli {
        return format!("{sign}{}\u{b5}s", decimal(magnitude, micro, 3));
    }
    if magnitude < second {
        return format!("{sign}{}ms", decimal(magnitude, milli, 6));
    }

    let hours = magnitude.div_euclid(u128::from(NANOS_PER_HOUR));
    let minutes = magnitude
        .rem_euclid(u128::from(NANOS_PER_HOUR))
        .div_euclid(u128::from(NANOS_PER_MINUTE));
    let seconds = decimal(magnitude.rem_euclid(u128::from(NANOS_PER_MINUTE)), second, 9);

    let mut rendered = String::from(sign);
    if hours > 0 {
        rendered.push_str(&format!("{hours}h{minutes}m"));
    } else if minutes > 0 {
        rendered.push_str(&format!("{minutes}m"));
    }
    rendered.push_str(&seconds);
    rendered.push('s');
    rendered
}

/// `value / unit` as a decimal with trailing fractional zeros removed.
fn decimal(value: u128, unit: u128, digits: usize) -> String {
    let whole = value.div_euclid(unit);
    let fraction = value.rem_euclid(unit);
    if fraction == 0 {
        return whole.to_string();
    }
    let padded = format!("{fraction:0digits$}");
    format!("{whole}.{}", padded.trim_end_matches('0'))
}
