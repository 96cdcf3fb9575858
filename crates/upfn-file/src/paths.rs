//! Lexical path manipulation.
//!
//! Nothing here touches the filesystem. Both `/` and the platform separator
//! are accepted on input; output uses the platform separator.

use std::path::MAIN_SEPARATOR;

use camino::{Utf8Component, Utf8Path};

fn is_separator(ch: char) -> bool {
    ch == '/' || ch == MAIN_SEPARATOR
}

/// Returns the shortest path equivalent to `path` by purely lexical
/// processing.
///
/// Repeated separators and `.` elements are dropped, `..` removes the element
/// before it, and `..` directly under the root is discarded. An empty result
/// becomes `.`.
///
/// # Example
///
/// ```
/// use upfn_file::paths::clean;
///
/// assert_eq!(clean("a//b/./../c/"), "a/c");
/// assert_eq!(clean("/../x"), "/x");
/// assert_eq!(clean(""), ".");
/// ```
#[must_use]
pub fn clean(path: &str) -> String {
    let mut prefix = String::new();
    let mut rooted = false;
    let mut elements: Vec<&str> = Vec::new();
    for component in Utf8Path::new(path).components() {
        match component {
            Utf8Component::Prefix(volume) => volume.as_str().clone_into(&mut prefix),
            Utf8Component::RootDir => rooted = true,
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match elements.last() {
                Some(&last) if last != ".." => {
                    elements.pop();
                }
                _ if rooted => {}
                _ => elements.push(".."),
            },
            Utf8Component::Normal(name) => elements.push(name),
        }
    }

    let joined = elements.join(&MAIN_SEPARATOR.to_string());
    let mut cleaned = prefix;
    if rooted {
        cleaned.push(MAIN_SEPARATOR);
    }
    cleaned.push_str(&joined);
    if cleaned.is_empty() {
        cleaned.push('.');
    }
    cleaned
}

/// Returns the last element of `path`, ignoring trailing separators.
///
/// A path made only of separators yields the separator; an empty path
/// yields `.`.
#[must_use]
pub fn base(path: &str) -> String {
    if path.is_empty() {
        return String::from(".");
    }
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return MAIN_SEPARATOR.to_string();
    }
    trimmed
        .rsplit(is_separator)
        .next()
        .unwrap_or(trimmed)
        .to_owned()
}

/// Returns everything before the last element of `path`, cleaned.
///
/// A path with no separator yields `.`.
#[must_use]
pub fn dir(path: &str) -> String {
    path.rsplit_once(is_separator).map_or_else(
        || String::from("."),
        |(head, _)| clean(&format!("{head}{MAIN_SEPARATOR}")),
    )
}

/// Returns the extension of the last element without its leading dot, or
/// an empty string when there is none.
#[must_use]
pub fn ext(path: &str) -> &str {
    let last = path.rsplit(is_separator).next().unwrap_or(path);
    last.rsplit_once('.').map_or("", |(_, extension)| extension)
}

/// Joins the non-empty `parts` with the separator and cleans the result.
///
/// Returns an empty string when every part is empty.
#[must_use]
pub fn join<S: AsRef<str>>(parts: &[S]) -> String {
    let present: Vec<&str> = parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.is_empty())
        .collect();
    if present.is_empty() {
        return String::new();
    }
    clean(&present.join(&MAIN_SEPARATOR.to_string()))
}
