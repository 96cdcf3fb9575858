//! Dynamic value model shared by requests and responses.
//!
//! Every value crossing the provider boundary is a [`DynamicValue`]. The
//! variants mirror the JSON data model exactly, so the host can send any
//! well-formed JSON and the provider can pattern-match it exhaustively.
//! Numbers are normalised as they are decoded: a wire `4.0` becomes the same
//! value as `4`, so integral numbers compare and render identically however
//! the host spelled them. The coercion layer decides which width an operation
//! wants.
//!
//! A successful result also carries a [`TypeTag`], which advises the host how
//! to interpret the value independently of its JSON shape.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use strum::{Display, EnumString};

/// Key-ordered mapping of parameter names to values.
pub type Mapping = BTreeMap<String, DynamicValue>;

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_EXACT_FLOAT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A JSON-shaped value exchanged with the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DynamicValue {
    /// JSON `null`.
    #[default]
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, integral or fractional.
    Number(Number),
    /// JSON string.
    String(String),
    /// Ordered JSON array.
    Sequence(Vec<DynamicValue>),
    /// JSON object keyed by string.
    Mapping(Mapping),
}

impl DynamicValue {
    /// Builds an integral number value.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::Number(Number::from(value))
    }

    /// Builds a number value from a float.
    ///
    /// Integral floats within the exactly representable range are stored as
    /// integers so they render as `1024` rather than `1024.0`. Returns `None`
    /// for NaN and infinities, which JSON cannot represent.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is integral and within the exact f64 integer range"
    )]
    pub fn float(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value.fract() == 0.0 && value.abs() < MAX_EXACT_FLOAT_INTEGER {
            return Some(Self::int(value as i64));
        }
        Number::from_f64(value).map(Self::Number)
    }

    /// Wraps a decoded JSON number, storing integral floats as integers.
    fn number(number: Number) -> Self {
        let integral = number
            .as_f64()
            .filter(|_| number.is_f64())
            .and_then(Self::float);
        integral.unwrap_or(Self::Number(number))
    }

    /// Returns `true` for [`DynamicValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice when the value is exactly a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the boolean when the value is exactly a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the number as `f64` when the value is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    /// Returns the number as `i64` when the value is a number.
    ///
    /// Fractional numbers are truncated toward zero and out-of-range numbers
    /// saturate at the `i64` bounds.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float-to-int casts truncate and saturate, which is the coercion rule"
    )]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|float| float as i64)),
            _ => None,
        }
    }

    /// Returns the elements when the value is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the entries when the value is a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Names the JSON shape of the value, for diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "list",
            Self::Mapping(_) => "mapping",
        }
    }
}

/// Plain-text rendering used when values are joined or compared as text.
///
/// Strings render without quotes; sequences and mappings render as compact
/// JSON.
impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::String(text) => f.write_str(text),
            Self::Sequence(_) | Self::Mapping(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl Serialize for DynamicValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Number(number) => number.serialize(serializer),
            Self::String(text) => serializer.serialize_str(text),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for DynamicValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<serde_json::Value> for DynamicValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => Self::number(number),
            serde_json::Value::String(text) => Self::String(text),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<DynamicValue> for serde_json::Value {
    fn from(value: DynamicValue) -> Self {
        match value {
            DynamicValue::Null => Self::Null,
            DynamicValue::Bool(flag) => Self::Bool(flag),
            DynamicValue::Number(number) => Self::Number(number),
            DynamicValue::String(text) => Self::String(text),
            DynamicValue::Sequence(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            DynamicValue::Mapping(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for DynamicValue {
    fn from(value: i64) -> Self {
        Self::int(value)
    }
}

impl From<String> for DynamicValue {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<&str> for DynamicValue {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<Vec<Self>> for DynamicValue {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for DynamicValue {
    fn from(entries: Mapping) -> Self {
        Self::Mapping(entries)
    }
}

/// Advisory tag describing how the host should interpret a result value.
///
/// The tag is orthogonal to the JSON shape: `ts`, `dur` and `uuid` all carry
/// strings, `block` carries a mapping and `list` a sequence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TypeTag {
    /// Plain text.
    String,
    /// Integral number.
    Int,
    /// Floating-point number.
    Float,
    /// Boolean.
    Bool,
    /// Ordered sequence.
    List,
    /// Key/value mapping.
    Block,
    /// Canonical 128-bit identifier rendering.
    Uuid,
    /// Formatted instant.
    Ts,
    /// Formatted duration.
    Dur,
}
