//! Filesystem provider.
//!
//! `read`, `exists` and `list` go through the [`Filesystem`] backend. The
//! remaining operations are lexical and never touch the disk.


mod host;
pub mod paths;

use camino::Utf8Path;
use glob::Pattern;
use upfn_protocol::{
    DynamicValue, Evaluated, Invocation, Operation, OperationError, OperationResult,
    OperationTable,
};

#[cfg(test)]
pub use self::host::MockFilesystem;
pub use self::host::{Filesystem, HostFilesystem};

type Call<'a> = Invocation<'a, dyn Filesystem>;

/// Operations served by the `file` provider.
pub const TABLE: OperationTable<dyn Filesystem> = OperationTable::new(
    "file",
    &[
        Operation::new("read", read),
        Operation::new("exists", exists),
        Operation::new("list", list),
        Operation::new("basename", basename),
        Operation::new("dirname", dirname),
        Operation::new("ext", ext),
        Operation::new("join", join),
    ],
);

fn path_param<'a>(call: &Call<'a>) -> Result<&'a str, OperationError> {
    call.params().required_str("path")
}

/// File contents as text; invalid UTF-8 is replaced rather than rejected.
fn read(call: &Call<'_>) -> OperationResult {
    let path = Utf8Path::new(path_param(call)?);
    let bytes = call
        .backend()
        .read(path)
        .map_err(|error| OperationError::io("failed to read file", error))?;
    Ok(Evaluated::string(String::from_utf8_lossy(&bytes)))
}

fn exists(call: &Call<'_>) -> OperationResult {
    let path = Utf8Path::new(path_param(call)?);
    Ok(Evaluated::bool(call.backend().exists(path)))
}

/// Sorted entry names in `dir` matching the shell glob `pattern`.
fn list(call: &Call<'_>) -> OperationResult {
    let params = call.params();
    let dir = Utf8Path::new(params.get_str("dir", "."));
    let raw_pattern = params.get_str("pattern", "*");
    let pattern = Pattern::new(raw_pattern).map_err(|error| {
        OperationError::invalid(format!("invalid pattern '{raw_pattern}': {}", error.msg))
    })?;

    let mut names: Vec<String> = call
        .backend()
        .list(dir)
        .map_err(|error| OperationError::io("failed to read directory", error))?
        .into_iter()
        .filter(|name| pattern.matches(name))
        .collect();
    names.sort_unstable();
    Ok(Evaluated::list(names.into_iter().map(DynamicValue::from).collect()))
}

fn basename(call: &Call<'_>) -> OperationResult {
    Ok(Evaluated::string(paths::base(path_param(call)?)))
}

fn dirname(call: &Call<'_>) -> OperationResult {
    Ok(Evaluated::string(paths::dir(path_param(call)?)))
}

fn ext(call: &Call<'_>) -> OperationResult {
    Ok(Evaluated::string(paths::ext(path_param(call)?)))
}

/// Joins `parts`, each rendered as plain text, and cleans the result.
fn join(call: &Call<'_>) -> OperationResult {
    let parts: Vec<String> = call
        .params()
        .non_empty_list("parts")?
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok(Evaluated::string(paths::join(&parts)))
}
