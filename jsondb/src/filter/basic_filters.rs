use std::any::Any;
use std::fmt::Display;

use crate::collection::Document;
use crate::common::{Value, TYPE_UNDEFINED};

use super::FilterProvider;

/// A filter that matches all documents.
pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

/// Matches documents whose field deeply equals a value.
///
/// An absent field never matches, not even a `null` value.
pub(crate) struct EqualsFilter {
    field_name: String,
    field_value: Value,
}

impl EqualsFilter {
    pub(crate) fn new(field_name: &str, field_value: Value) -> Self {
        EqualsFilter {
            field_name: field_name.to_string(),
            field_value,
        }
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> bool {
        entry.get(&self.field_name) == Some(&self.field_value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Negation of [EqualsFilter]; an absent field always matches.
pub(crate) struct NotEqualsFilter {
    field_name: String,
    field_value: Value,
}

impl NotEqualsFilter {
    pub(crate) fn new(field_name: &str, field_value: Value) -> Self {
        NotEqualsFilter {
            field_name: field_name.to_string(),
            field_value,
        }
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for NotEqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> bool {
        entry.get(&self.field_name) != Some(&self.field_value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Checks for the presence (or absence) of a field. A field holding `null`
/// is present.
pub(crate) struct ExistsFilter {
    field_name: String,
    present: bool,
}

impl ExistsFilter {
    pub(crate) fn new(field_name: &str, present: bool) -> Self {
        ExistsFilter {
            field_name: field_name.to_string(),
            present,
        }
    }
}

impl Display for ExistsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.present {
            write!(f, "({} exists)", self.field_name)
        } else {
            write!(f, "({} not exists)", self.field_name)
        }
    }
}

impl FilterProvider for ExistsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> bool {
        entry.contains_key(&self.field_name) == self.present
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches documents whose field equals one of the given values.
pub(crate) struct InFilter {
    field_name: String,
    values: Vec<Value>,
}

impl InFilter {
    pub(crate) fn new(field_name: &str, values: Vec<Value>) -> Self {
        InFilter {
            field_name: field_name.to_string(),
            values,
        }
    }
}

impl Display for InFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} in {})", self.field_name, Value::Array(self.values.clone()))
    }
}

impl FilterProvider for InFilter {
    fn apply(&self, entry: &Document) -> bool {
        match entry.get(&self.field_name) {
            Some(value) => self.values.contains(value),
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches documents whose field equals none of the given values. An absent
/// field matches.
pub(crate) struct NotInFilter {
    field_name: String,
    values: Vec<Value>,
}

impl NotInFilter {
    pub(crate) fn new(field_name: &str, values: Vec<Value>) -> Self {
        NotInFilter {
            field_name: field_name.to_string(),
            values,
        }
    }
}

impl Display for NotInFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} not in {})", self.field_name, Value::Array(self.values.clone()))
    }
}

impl FilterProvider for NotInFilter {
    fn apply(&self, entry: &Document) -> bool {
        match entry.get(&self.field_name) {
            Some(value) => !self.values.contains(value),
            None => true,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Containment test.
///
/// A string field matches when it contains the operand as a substring (the
/// operand must be a string too). An array field matches when one of its
/// elements equals the operand. Any other field never matches.
pub(crate) struct IncludesFilter {
    field_name: String,
    field_value: Value,
}

impl IncludesFilter {
    pub(crate) fn new(field_name: &str, field_value: Value) -> Self {
        IncludesFilter {
            field_name: field_name.to_string(),
            field_value,
        }
    }
}

impl Display for IncludesFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} includes {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for IncludesFilter {
    fn apply(&self, entry: &Document) -> bool {
        match (entry.get(&self.field_name), &self.field_value) {
            (Some(Value::String(text)), Value::String(part)) => text.contains(part.as_str()),
            (Some(Value::Array(items)), operand) => items.contains(operand),
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches on the kind name of a field, `undefined` standing for an absent one.
pub(crate) struct TypeFilter {
    field_name: String,
    kind: String,
}

impl TypeFilter {
    pub(crate) fn new(field_name: &str, kind: &str) -> Self {
        TypeFilter {
            field_name: field_name.to_string(),
            kind: kind.to_string(),
        }
    }
}

impl Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} is {})", self.field_name, self.kind)
    }
}

impl FilterProvider for TypeFilter {
    fn apply(&self, entry: &Document) -> bool {
        let kind = entry
            .get(&self.field_name)
            .map(|v| v.kind_name())
            .unwrap_or(TYPE_UNDEFINED);
        kind == self.kind
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
