use crate::collection::Document;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

/// Largest integer an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Represents a [Document] field value.
///
/// The value domain is the JSON one: null, booleans, numbers, strings, arrays
/// and objects. Objects are [Document]s, so a nested object supports the same
/// API as a top level record.
///
/// Numbers are stored as `f64`. Integral numbers within the exactly
/// representable range are written without a fractional part, so `42` stays
/// `42` after a save/load round trip. Integers beyond 2^53 in magnitude are
/// rounded to the nearest `f64` when converted, so
/// `Value::from(9_007_199_254_740_993_i64)` holds `9_007_199_254_740_992`.
///
/// # Usage
///
/// ```rust
/// use jsondb::common::Value;
/// use jsondb::doc;
///
/// let v: Value = 42.into();
/// assert_eq!(v.as_number(), Some(42.0));
///
/// let doc = doc! { name: "Alice", tags: ["a", "b"] };
/// assert_eq!(doc.get("name").and_then(|v| v.as_string()), Some("Alice"));
/// ```
#[derive(Clone, Default, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a number.
    Number(f64),
    /// Represents a string value.
    String(String),
    /// Represents an ordered sequence of values.
    Array(Vec<Value>),
    /// Represents an object.
    Object(Document),
}

impl Value {
    /// Converts any supported type into a `Value`.
    pub fn from<T: Into<Value>>(value: T) -> Value {
        value.into()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Object(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Value::Object(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_document(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Flag semantics used by `$exists`, `$unset` and projections.
    ///
    /// `null`, `false`, `0`, `NaN` and `""` are falsy; everything else,
    /// including empty arrays and objects, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(v) => *v,
            Value::Number(v) => *v != 0.0 && !v.is_nan(),
            Value::String(v) => !v.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// The kind name matched by the `$type` query operator.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Orders two values of the same comparable kind.
    ///
    /// Numbers compare numerically and strings lexicographically. Any other
    /// pairing, or a comparison involving `NaN`, has no ordering.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Textual form of a scalar, used when matching patterns against
    /// non-string fields. Arrays, objects and null have none.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::String(v) => Some(v.clone()),
            Value::Number(v) => Some(format_number(*v)),
            Value::Bool(v) => Some(v.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Takes the value out, leaving [Value::Null] in its place.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

/// Formats a number the way it is written to disk: integral values without a
/// fractional part.
pub(crate) fn format_number(value: f64) -> String {
    if is_integral(value) {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[inline]
fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Number(v) if is_integral(*v) => serializer.serialize_i64(*v as i64),
            Value::Number(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Array(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Value::Object(doc) => {
                let mut map = serializer.serialize_map(Some(doc.size()))?;
                for (key, value) in doc.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "<unprintable>"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Number(value as f64)
                }
            }
        )*
    };
}

number_from!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Object(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}
