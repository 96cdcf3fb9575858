//! Sequence provider.
//!
//! Every operation except `generate` reads its sequence from the `items`
//! parameter. Elements are compared and joined through their plain-text
//! rendering, so `1` and `"1"` are considered equal by `contains`.

#[cfg(test)]
mod tests;

mod template;

use upfn_protocol::params::clamp_range;
use upfn_protocol::{
    DynamicValue, Evaluated, Invocation, Operation, OperationError, OperationResult,
    OperationTable, TypeTag,
};

pub use self::template::{ItemContext, expand};

/// Largest sequence `generate` will build.
pub const MAX_GENERATED_ITEMS: i64 = 10_000;

/// Operations served by the `list` provider.
pub const TABLE: OperationTable = OperationTable::new(
    "list",
    &[
        Operation::new("generate", generate),
        Operation::new("join", join),
        Operation::new("slice", slice),
        Operation::new("length", length),
        Operation::new("contains", contains),
        Operation::new("index", index),
    ],
);

fn generate(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let count = params.get_i64("count", 0);
    if count <= 0 {
        return Err(OperationError::shape("count", "positive"));
    }
    let total = usize::try_from(count)
        .ok()
        .filter(|_| count <= MAX_GENERATED_ITEMS)
        .ok_or_else(|| {
            OperationError::invalid(format!("count too large (max {MAX_GENERATED_ITEMS})"))
        })?;
    let template = params.require("template")?;

    let context = call.context().as_mapping();
    let items = (0..total)
        .map(|position| expand(template, &ItemContext::new(position, total), context))
        .collect();
    Ok(Evaluated::list(items))
}

fn join(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let items = params.list("items")?;
    let separator = params.get_str("separator", ",");
    let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
    Ok(Evaluated::string(rendered.join(separator)))
}

fn slice(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let items = params.list("items")?;
    let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
    let range = clamp_range(params.get_i64("start", 0), params.get_i64("end", len), items.len());
    let selected = items.get(range).unwrap_or_default();
    Ok(Evaluated::list(selected.to_vec()))
}

fn length(call: &Invocation<'_>) -> OperationResult {
    let items = call.params().list("items")?;
    let len = i64::try_from(items.len())
        .map_err(|_| OperationError::invalid("items too long"))?;
    Ok(Evaluated::int(len))
}

fn contains(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let items = params.list("items")?;
    let needle = params.require("value")?.to_string();
    let found = items.iter().any(|item| item.to_string() == needle);
    Ok(Evaluated::bool(found))
}

/// Returns the element unchanged; the tag is advisory and always `string`.
fn index(call: &Invocation<'_>) -> OperationResult {
    let params = call.params();
    let items = params.list("items")?;
    let position = params.get_i64("index", 0);
    usize::try_from(position)
        .ok()
        .and_then(|at| items.get(at))
        .map(|item| Evaluated::new(DynamicValue::clone(item), TypeTag::String))
        .ok_or_else(|| OperationError::invalid("index out of range"))
}
