//! Request and response types exchanged with the host.
//!
//! The host writes one [`Request`] object to the provider's stdin and reads
//! one [`Response`] object from its stdout. A response is either a value with
//! its [`TypeTag`] or an error message, never both.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OperationError;
use crate::value::{DynamicValue, Mapping, TypeTag};

/// Request read from the provider's stdin.
///
/// Every field is optional on the wire. Absent or `null` fields decode to
/// their empty value, so `{}` is a request for the function `""`.
///
/// # Example
///
/// ```
/// use upfn_protocol::Request;
///
/// let request: Request =
///     serde_json::from_str(r#"{"function":"upper","params":{"s":"hi"}}"#)
///         .expect("valid request");
/// assert_eq!(request.function(), "upper");
/// assert_eq!(request.params().len(), 1);
/// assert!(request.context().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, deserialize_with = "null_as_default")]
    function: String,
    #[serde(default, deserialize_with = "null_as_default")]
    params: Mapping,
    #[serde(default, deserialize_with = "null_as_default")]
    context: Mapping,
}

impl Request {
    /// Creates a request for `function` with no parameters or context.
    #[must_use]
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            params: Mapping::new(),
            context: Mapping::new(),
        }
    }

    /// Replaces the parameter mapping.
    #[must_use]
    pub fn with_params(mut self, params: Mapping) -> Self {
        self.params = params;
        self
    }

    /// Replaces the context mapping.
    #[must_use]
    pub fn with_context(mut self, context: Mapping) -> Self {
        self.context = context;
        self
    }

    /// Returns the requested function name.
    #[must_use]
    pub const fn function(&self) -> &str {
        self.function.as_str()
    }

    /// Returns the operation parameters.
    #[must_use]
    pub const fn params(&self) -> &Mapping {
        &self.params
    }

    /// Returns the host-supplied context.
    #[must_use]
    pub const fn context(&self) -> &Mapping {
        &self.context
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Result of a successful operation: a value and its advisory tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    value: DynamicValue,
    tag: TypeTag,
}

impl Evaluated {
    /// Pairs a value with a tag.
    #[must_use]
    pub const fn new(value: DynamicValue, tag: TypeTag) -> Self {
        Self { value, tag }
    }

    /// A `string`-tagged text value.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::new(DynamicValue::String(text.into()), TypeTag::String)
    }

    /// An `int`-tagged integer value.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::new(DynamicValue::int(value), TypeTag::Int)
    }

    /// A `float`-tagged number.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidParameter`] when `value` is NaN or
    /// infinite, since JSON cannot carry it.
    pub fn float(value: f64) -> Result<Self, OperationError> {
        DynamicValue::float(value)
            .map(|number| Self::new(number, TypeTag::Float))
            .ok_or_else(|| OperationError::invalid("result is not a finite number"))
    }

    /// A `bool`-tagged value.
    #[must_use]
    pub const fn bool(flag: bool) -> Self {
        Self::new(DynamicValue::Bool(flag), TypeTag::Bool)
    }

    /// A `list`-tagged sequence.
    #[must_use]
    pub const fn list(items: Vec<DynamicValue>) -> Self {
        Self::new(DynamicValue::Sequence(items), TypeTag::List)
    }

    /// A `block`-tagged mapping.
    #[must_use]
    pub const fn block(entries: Mapping) -> Self {
        Self::new(DynamicValue::Mapping(entries), TypeTag::Block)
    }

    /// A `uuid`-tagged identifier string.
    #[must_use]
    pub fn uuid(text: impl Into<String>) -> Self {
        Self::new(DynamicValue::String(text.into()), TypeTag::Uuid)
    }

    /// A `ts`-tagged formatted instant.
    #[must_use]
    pub fn ts(text: impl Into<String>) -> Self {
        Self::new(DynamicValue::String(text.into()), TypeTag::Ts)
    }

    /// A `dur`-tagged formatted duration.
    #[must_use]
    pub fn dur(text: impl Into<String>) -> Self {
        Self::new(DynamicValue::String(text.into()), TypeTag::Dur)
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &DynamicValue {
        &self.value
    }

    /// Returns the tag.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Splits into value and tag.
    #[must_use]
    pub fn into_parts(self) -> (DynamicValue, TypeTag) {
        (self.value, self.tag)
    }
}

/// Response written to the provider's stdout.
///
/// Serialised either as `{"value":...,"type":"..."}` or `{"error":"..."}`.
///
/// # Example
///
/// ```
/// use upfn_protocol::{Evaluated, Response};
///
/// let ok = Response::success(Evaluated::int(3));
/// assert_eq!(
///     serde_json::to_string(&ok).expect("serialise"),
///     r#"{"value":3,"type":"int"}"#
/// );
///
/// let failed = Response::failure("Unknown function: bogus");
/// assert_eq!(
///     serde_json::to_string(&failed).expect("serialise"),
///     r#"{"error":"Unknown function: bogus"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// Successful outcome.
    Value {
        /// The result value.
        value: DynamicValue,
        /// Advisory interpretation tag.
        #[serde(rename = "type")]
        tag: TypeTag,
    },
    /// Failed outcome.
    Error {
        /// Human-readable failure message.
        error: String,
    },
}

impl Response {
    /// Builds a successful response.
    #[must_use]
    pub fn success(evaluated: Evaluated) -> Self {
        let (value, tag) = evaluated.into_parts();
        Self::Value { value, tag }
    }

    /// Builds a failed response.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Returns whether the response carries a value.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Value { .. })
    }

    /// Returns the value of a successful response.
    #[must_use]
    pub const fn value(&self) -> Option<&DynamicValue> {
        match self {
            Self::Value { value, .. } => Some(value),
            Self::Error { .. } => None,
        }
    }

    /// Returns the tag of a successful response.
    #[must_use]
    pub const fn tag(&self) -> Option<TypeTag> {
        match self {
            Self::Value { tag, .. } => Some(*tag),
            Self::Error { .. } => None,
        }
    }

    /// Returns the message of a failed response.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Value { .. } => None,
            Self::Error { error } => Some(error.as_str()),
        }
    }
}
