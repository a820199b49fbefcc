use im::OrdMap;

use crate::common::{Value, DOC_ID};
use std::fmt::{Debug, Display};

/// Represents a document stored in a collection.
///
/// A document is a mapping from field name to [Value]. Inside a collection it
/// always carries a non-empty string `_id`, unique within that collection and
/// never changed after insertion.
///
/// ## Persistent storage
///
/// Fields live in an `im::OrdMap`, a persistent ordered map:
/// - cloning is O(1) and shares structure, which makes collection snapshots cheap
/// - a mutation copies only the touched path, so a clone never observes it
/// - fields iterate in key order, which keeps scans and saved files deterministic
#[derive(Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// ```rust
    /// use jsondb::collection::Document;
    ///
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// assert_eq!(doc.size(), 0);
    /// ```
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of top level fields.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates `value` with `key`, returning the previous value.
    ///
    /// ```rust
    /// use jsondb::collection::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice");
    /// assert_eq!(doc.put("name", "Bob").and_then(|v| v.as_string().map(String::from)),
    ///            Some("Alice".to_string()));
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) -> Option<Value> {
        self.data.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// The `_id` of this document when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.get(DOC_ID).and_then(|v| v.as_string())
    }

    /// Whether the document carries an `_id` field of any type.
    pub fn has_id(&self) -> bool {
        self.contains_key(DOC_ID)
    }

    /// Field names in iteration order.
    pub fn fields(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Document {
            data: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = im::ordmap::ConsumingIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "<unprintable>"),
        }
    }
}

/// The documents of a collection keyed by `_id`, in key order.
///
/// Like [Document] this is a persistent map, so a snapshot handed to the
/// writer is an O(1) clone that later mutations never reach.
pub type DocumentMap = OrdMap<String, Document>;

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use jsondb::doc;
///
/// let empty = doc!{};
/// assert!(empty.is_empty());
///
/// let user = doc!{
///     name: "Alice",
///     "last name": "Smith",
///     age: 30,
///     address: { city: "Sofia", zip: 1000 },
///     tags: ["a", "b"],
/// };
/// assert_eq!(user.size(), 5);
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value));
            )*
            doc
        }
    };
}

/// Helper macro converting values for the [doc!] macro.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Object($crate::doc!{ $($key : $value),* })
        }
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
