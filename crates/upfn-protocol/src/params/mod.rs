//! Typed parameter accessors over a request mapping.
//!
//! Scalar accessors take a default and return it whenever the key is absent
//! *or* holds a value of the wrong JSON type. The two cases are
//! indistinguishable to the caller: `{"x": "ten"}` read as an integer with a
//! default of `10` yields `10`, exactly as `{}` does. Providers rely on this
//! leniency, so it is kept.
//!
//! Structured accessors ([`Params::list`], [`Params::require`]) cannot
//! fabricate a default and fail with a missing-parameter error instead.

use std::ops::Range;

use crate::error::OperationError;
use crate::value::{DynamicValue, Mapping};

/// Borrowed view over a parameter or context mapping.
///
/// # Example
///
/// ```
/// use upfn_protocol::{DynamicValue, Mapping, Params};
///
/// let mut values = Mapping::new();
/// values.insert("x".into(), DynamicValue::from("not-a-number"));
/// let params = Params::new(&values);
///
/// assert_eq!(params.get_i64("missing", 10), 10);
/// assert_eq!(params.get_i64("x", 10), 10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    values: &'a Mapping,
}

impl<'a> Params<'a> {
    /// Wraps a mapping.
    #[must_use]
    pub const fn new(values: &'a Mapping) -> Self {
        Self { values }
    }

    /// Returns the raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a DynamicValue> {
        self.values.get(key)
    }

    /// Returns `true` when `key` is present, whatever its type.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the underlying mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> &'a Mapping {
        self.values
    }

    /// Reads a string, falling back to `default` when absent or not a string.
    #[must_use]
    pub fn get_str(&self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(DynamicValue::as_str).unwrap_or(default)
    }

    /// Reads an integer, falling back to `default` when absent or not a
    /// number.
    ///
    /// Fractional numbers are truncated toward zero.
    #[must_use]
    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(DynamicValue::as_i64).unwrap_or(default)
    }

    /// Reads a float, falling back to `default` when absent or not a number.
    #[must_use]
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(DynamicValue::as_f64).unwrap_or(default)
    }

    /// Reads a boolean, falling back to `default` when absent or not a
    /// boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(DynamicValue::as_bool).unwrap_or(default)
    }

    /// Reads a required string.
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::MissingParameter`] when the key is absent,
    /// not a string, or empty.
    pub fn required_str(&self, key: &str) -> Result<&'a str, OperationError> {
        match self.get_str(key, "") {
            "" => Err(OperationError::missing(key)),
            text => Ok(text),
        }
    }

    /// Reads a value of any shape.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::MissingParameter`] when the key is absent.
    pub fn require(&self, key: &str) -> Result<&'a DynamicValue, OperationError> {
        self.get(key).ok_or_else(|| OperationError::missing(key))
    }

    /// Reads a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::ParameterShape`] when the key is absent or
    /// the value is not a sequence.
    pub fn list(&self, key: &str) -> Result<&'a [DynamicValue], OperationError> {
        self.get(key)
            .and_then(DynamicValue::as_sequence)
            .ok_or_else(|| OperationError::shape(key, "a list"))
    }

    /// Reads a sequence holding at least one element.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::ParameterShape`] when the key is absent, the
    /// value is not a sequence, or the sequence is empty.
    pub fn non_empty_list(&self, key: &str) -> Result<&'a [DynamicValue], OperationError> {
        self.get(key)
            .and_then(DynamicValue::as_sequence)
            .filter(|items| !items.is_empty())
            .ok_or_else(|| OperationError::shape(key, "non-empty list"))
    }
}

/// Clamps a half-open `start..end` request onto a sequence of length `len`.
///
/// Both bounds are clamped into `0..=len` and `start` never exceeds `end`, so
/// out-of-range or inverted requests produce an empty range rather than an
/// error.
///
/// # Example
///
/// ```
/// use upfn_protocol::params::clamp_range;
///
/// assert_eq!(clamp_range(1, 10, 3), 1..3);
/// assert_eq!(clamp_range(5, 3, 3), 3..3);
/// assert_eq!(clamp_range(2, 0, 3), 0..0);
/// ```
#[must_use]
pub fn clamp_range(start: i64, end: i64, len: usize) -> Range<usize> {
    let clamp = |bound: i64, upper: usize| {
        usize::try_from(bound.max(0)).map_or(upper, |value| value.min(upper))
    };
    let stop = clamp(end, len);
    clamp(start, stop)..stop
}
