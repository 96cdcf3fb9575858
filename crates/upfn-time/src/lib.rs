//! Time provider.
//!
//! Timestamps travel as strings in a named or custom [`Layout`], durations as
//! Go-style expressions handled by [`duration`]. Every instant is computed in
//! UTC unless the input carries its own offset, which is then preserved. The
//! current instant comes from the [`Clock`] backend.


pub mod duration;
mod layout;
mod reference;

pub use layout::{Layout, LayoutError};

use time::{Duration, OffsetDateTime};
use upfn_protocol::{
    Clock, Evaluated, Invocation, Operation, OperationError, OperationResult, OperationTable,
    Params,
};

/// Layout used whenever a `format` parameter is omitted.
pub const DEFAULT_LAYOUT: &str = "RFC3339";

type Call<'a> = Invocation<'a, dyn Clock>;

/// Operations served by the `time` provider.
pub const TABLE: OperationTable<dyn Clock> = OperationTable::new(
    "time",
    &[
        Operation::new("now", now),
        Operation::new("unix", unix),
        Operation::new("format", format),
        Operation::new("parse", parse),
        Operation::new("add", add),
        Operation::new("sub", sub),
        Operation::new("since", since),
        Operation::new("until", until),
    ],
);

fn current(call: &Call<'_>) -> OffsetDateTime {
    OffsetDateTime::from(call.backend().now())
}

fn resolve_layout(params: Params<'_>, key: &str) -> Result<Layout, OperationError> {
    Layout::resolve(params.get_str(key, DEFAULT_LAYOUT))
        .map_err(|error| OperationError::invalid(error.to_string()))
}

fn read_time(text: &str, layout: &Layout) -> Result<OffsetDateTime, OperationError> {
    layout
        .parse(text)
        .map_err(|error| OperationError::invalid(format!("failed to parse time: {error}")))
}

fn write_time(instant: OffsetDateTime, layout: &Layout) -> Result<String, OperationError> {
    layout
        .format(instant)
        .map_err(|error| OperationError::invalid(format!("failed to format time: {error}")))
}

/// Reads the `time` parameter as RFC 3339, defaulting to the current instant.
fn time_or_now(call: &Call<'_>) -> Result<OffsetDateTime, OperationError> {
    match call.params().get_str("time", "") {
        "" => Ok(current(call)),
        text => read_time(text, &Layout::Rfc3339),
    }
}

fn read_duration(call: &Call<'_>) -> Result<Duration, OperationError> {
    let text = call.params().required_str("duration")?;
    duration::parse(text)
        .map(Duration::nanoseconds)
        .map_err(|error| OperationError::invalid(format!("failed to parse duration: {error}")))
}

fn shifted(
    call: &Call<'_>,
    apply: fn(OffsetDateTime, Duration) -> Option<OffsetDateTime>,
) -> OperationResult {
    let start = time_or_now(call)?;
    let offset = read_duration(call)?;
    let end = apply(start, offset)
        .ok_or_else(|| OperationError::invalid("resulting time is out of range"))?;
    Ok(Evaluated::ts(write_time(end, &Layout::Rfc3339)?))
}

fn now(call: &Call<'_>) -> OperationResult {
    let layout = resolve_layout(call.params(), "format")?;
    Ok(Evaluated::ts(write_time(current(call), &layout)?))
}

fn unix(call: &Call<'_>) -> OperationResult {
    Ok(Evaluated::int(current(call).unix_timestamp()))
}

/// Re-renders `time`, read with `input_format`, in `format`.
fn format(call: &Call<'_>) -> OperationResult {
    let params = call.params();
    let text = params.required_str("time")?;
    let output = resolve_layout(params, "format")?;
    let input = resolve_layout(params, "input_format")?;
    let instant = read_time(text, &input)?;
    Ok(Evaluated::string(write_time(instant, &output)?))
}

/// Reads `time` with `format` and normalises it to RFC 3339.
fn parse(call: &Call<'_>) -> OperationResult {
    let params = call.params();
    let text = params.required_str("time")?;
    let input = resolve_layout(params, "format")?;
    let instant = read_time(text, &input)?;
    Ok(Evaluated::ts(write_time(instant, &Layout::Rfc3339)?))
}

fn add(call: &Call<'_>) -> OperationResult {
    shifted(call, OffsetDateTime::checked_add)
}

fn sub(call: &Call<'_>) -> OperationResult {
    shifted(call, OffsetDateTime::checked_sub)
}

fn required_time(call: &Call<'_>) -> Result<OffsetDateTime, OperationError> {
    let text = call.params().required_str("time")?;
    read_time(text, &Layout::Rfc3339)
}

/// Time elapsed from `time` to now; negative for future instants.
fn since(call: &Call<'_>) -> OperationResult {
    let elapsed = current(call) - required_time(call)?;
    Ok(Evaluated::dur(duration::format(elapsed.whole_nanoseconds())))
}

/// Time remaining from now to `time`; negative for past instants.
fn until(call: &Call<'_>) -> OperationResult {
    let remaining = required_time(call)? - current(call);
    Ok(Evaluated::dur(duration::format(remaining.whole_nanoseconds())))
}
