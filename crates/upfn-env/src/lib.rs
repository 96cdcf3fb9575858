//! Environment variable provider.
//!
//! Operations read through the [`Environment`] trait rather than the process
//! environment directly, which keeps them testable without mutating global
//! state.


use std::env;

use upfn_protocol::{
    DynamicValue, Evaluated, Invocation, Mapping, Operation, OperationResult, OperationTable,
};

/// Read-only view of a set of environment variables.
#[cfg_attr(test, mockall::automock)]
pub trait Environment {
    /// Returns the value of `key`, or `None` when it is unset.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns every variable as a key/value pair.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The environment of the current process.
///
/// Values that are not valid Unicode are converted lossily.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }

    fn vars(&self) -> Vec<(String, String)> {
        env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }
}

type Call<'a> = Invocation<'a, dyn Environment>;

/// Operations served by the `env` provider.
pub const TABLE: OperationTable<dyn Environment> = OperationTable::new(
    "env",
    &[
        Operation::new("get", get),
        Operation::new("has", has),
        Operation::new("list", list),
        Operation::new("expand", expand),
    ],
);

/// Reads `key`; an unset or empty value yields `default` when one is given.
fn get(call: &Call<'_>) -> OperationResult {
    let params = call.params();
    let key = params.required_str("key")?;
    let fallback = params.get_str("default", "");
    let value = call.backend().var(key).unwrap_or_default();
    if value.is_empty() && !fallback.is_empty() {
        return Ok(Evaluated::string(fallback));
    }
    Ok(Evaluated::string(value))
}

/// Reports whether `key` is set, even to the empty string.
fn has(call: &Call<'_>) -> OperationResult {
    let key = call.params().required_str("key")?;
    Ok(Evaluated::bool(call.backend().var(key).is_some()))
}

fn list(call: &Call<'_>) -> OperationResult {
    let prefix = call.params().get_str("prefix", "");
    let matching: Mapping = call
        .backend()
        .vars()
        .into_iter()
        .filter(|(key, _)| key.starts_with(prefix))
        .map(|(key, value)| (key, DynamicValue::String(value)))
        .collect();
    Ok(Evaluated::block(matching))
}

/// Substitutes `$VAR` and `${VAR}`; unset variables expand to nothing.
fn expand(call: &Call<'_>) -> OperationResult {
    let text = call.params().required_str("text")?;
    let environment = call.backend();
    let expanded = shellexpand::env_with_context_no_errors(text, |name: &str| {
        Some(environment.var(name).unwrap_or_default())
    });
    Ok(Evaluated::string(expanded.into_owned()))
}
