//! Text provider.
//!
//! Every operation except `join` requires a non-empty `s` parameter.
//! Positions, lengths and reversal work on Unicode scalar values, never on
//! bytes, so slicing can never split a character.

#[cfg(test)]
mod tests;

use upfn_protocol::params::clamp_range;
use upfn_protocol::{
    DynamicValue, Evaluated, Invocation, Operation, OperationError, OperationResult,
    OperationTable,
};

/// Largest `count` accepted by `repeat`.
pub const MAX_REPEAT: i64 = 10_000;

const DEFAULT_CUTSET: &str = " \t\n\r";

/// Operations served by the `string` provider.
pub const TABLE: OperationTable = OperationTable::new(
    "string",
    &[
        Operation::new("upper", upper),
        Operation::new("lower", lower),
        Operation::new("title", title),
        Operation::new("trim", trim),
        Operation::new("trimPrefix", trim_prefix),
        Operation::new("trimSuffix", trim_suffix),
        Operation::new("split", split),
        Operation::new("join", join),
        Operation::new("replace", replace),
        Operation::new("replaceAll", replace_all),
        Operation::new("contains", contains),
        Operation::new("hasPrefix", has_prefix),
        Operation::new("hasSuffix", has_suffix),
        Operation::new("slice", slice),
        Operation::new("repeat", repeat),
        Operation::new("reverse", reverse),
        Operation::new("length", length),
    ],
);

fn subject<'a>(call: &Invocation<'a>) -> Result<&'a str, OperationError> {
    call.params().required_str("s")
}

fn upper(call: &Invocation<'_>) -> OperationResult {
    Ok(Evaluated::string(subject(call)?.to_uppercase()))
}

fn lower(call: &Invocation<'_>) -> OperationResult {
    Ok(Evaluated::string(subject(call)?.to_lowercase()))
}

/// Upper-cases the first letter of every word and leaves the rest alone.
fn title(call: &Invocation<'_>) -> OperationResult {
    Ok(Evaluated::string(title_case(subject(call)?)))
}

/// Title-cases `text`.
///
/// Letters, digits and `_` belong to a word. Other ASCII characters separate
/// words, and beyond ASCII only whitespace does.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            titled.extend(ch.to_uppercase());
        } else {
            titled.push(ch);
        }
        at_word_start = if ch.is_ascii() {
            !(ch.is_ascii_alphanumeric() || ch == '_')
        } else {
            ch.is_whitespace()
        };
    }
    titled
}

fn trim(call: &Invocation<'_>) -> OperationResult {
    let text = subject(call)?;
    let cutset = call.params().get_str("cutset", DEFAULT_CUTSET);
    Ok(Evaluated::string(text.trim_matches(|ch: char| cutset.contains(ch))))
}

fn trim_prefix(call: &Invocation<'_>) -> OperationResult {
    let text = subject(call)?;
    let prefix = call.params().required_str("prefix")?;
    Ok(Evaluated::string(text.strip_prefix(prefix).unwrap_or(text)))
}

fn trim_suffix(call: &Invocation<'_>) -> OperationResult {
    let text = subject(call)?;
    let suffix = call.params().required_str("suffix")?;
    Ok(Evaluated::string(text.strip_suffix(suffix).unwrap_or(text)))
}

/// Splits on `sep`; an empty separator yields one element per character.
fn split(call: &Invocation<'_>) -> OperationResult {
    let text = subject(call)?;
    let separator = call.params().get_str("sep", ",");
    let parts: Vec<DynamicValue> = if separator.is_empty() {
        text.chars().map(|ch| ch.to_string().into()).collect()
    } else {
        text.split(separator).map(Into::into).collect()
    };
    Ok(Evaluated::list(parts))
}

fn join(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let items = params.list("items")?;
    let separator = params.get_str("sep", ",");
    let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
    Ok(Evaluated::string(rendered.join(separator)))
}

/// Replaces the first `n` matches; a negative `n` replaces every match.
fn replace(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let text = subject(call)?;
    let old = params.required_str("old")?;
    let new = params.get_str("new", "");
    let replaced = match usize::try_from(params.get_i64("n", 1)) {
        Ok(limit) => text.replacen(old, new, limit),
        Err(_) => text.replace(old, new),
    };
    Ok(Evaluated::string(replaced))
}

fn replace_all(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let text = subject(call)?;
    let old = params.required_str("old")?;
    Ok(Evaluated::string(text.replace(old, params.get_str("new", ""))))
}

fn contains(call: &Invocation<'_>) -> OperationResult {
    let text = subject(call)?;
    let needle = call.params().required_str("substr")?;
    Ok(Evaluated::bool(text.contains(needle)))
}

fn has_prefix(call: &Invocation<'_>) -> OperationResult {
    let text = subject(call)?;
    let prefix = call.params().required_str("prefix")?;
    Ok(Evaluated::bool(text.starts_with(prefix)))
}

fn has_suffix(call: &Invocation<'_>) -> OperationResult {
    let text = subject(call)?;
    let suffix = call.params().required_str("suffix")?;
    Ok(Evaluated::bool(text.ends_with(suffix)))
}

fn slice(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let text = subject(call)?;
    let len = text.chars().count();
    let range = clamp_range(
        params.get_i64("start", 0),
        params.get_i64("end", i64::try_from(len).unwrap_or(i64::MAX)),
        len,
    );
    let sliced: String = text
        .chars()
        .skip(range.start)
        .take(range.len())
        .collect();
    Ok(Evaluated::string(sliced))
}

fn repeat(call: &Invocation<'_>) -> OperationResult {
    let text = subject(call)?;
    let count = call.params().get_i64("count", 1);
    if count > MAX_REPEAT {
        return Err(OperationError::invalid(format!(
            "count too large (max {MAX_REPEAT})"
        )));
    }
    let times =
        usize::try_from(count).map_err(|_| OperationError::invalid("count must be non-negative"))?;
    Ok(Evaluated::string(text.repeat(times)))
}

fn reverse(call: &Invocation<'_>) -> OperationResult {
    Ok(Evaluated::string(subject(call)?.chars().rev().collect::<String>()))
}

fn length(call: &Invocation<'_>) -> OperationResult {
    let count = subject(call)?.chars().count();
    let len = i64::try_from(count).map_err(|_| OperationError::invalid("s too long"))?;
    Ok(Evaluated::int(len))
}
