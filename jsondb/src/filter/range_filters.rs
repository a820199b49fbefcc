use std::any::Any;
use std::cmp::Ordering;
use std::fmt::Display;

use crate::collection::Document;
use crate::common::Value;

use super::FilterProvider;

/// Defines comparison operations used by [ComparisonFilter].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonMode {
    #[inline]
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonMode::Greater => ordering == Ordering::Greater,
            ComparisonMode::GreaterEqual => ordering != Ordering::Less,
            ComparisonMode::Lesser => ordering == Ordering::Less,
            ComparisonMode::LesserEqual => ordering != Ordering::Greater,
        }
    }
}

impl Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonMode::Greater => write!(f, ">"),
            ComparisonMode::GreaterEqual => write!(f, ">="),
            ComparisonMode::Lesser => write!(f, "<"),
            ComparisonMode::LesserEqual => write!(f, "<="),
        }
    }
}

/// Ordered comparison of a field against a number or a string.
///
/// Only values of the same kind are ordered: numbers numerically, strings
/// lexicographically. A field of any other kind, an absent field or `NaN`
/// never matches.
pub(crate) struct ComparisonFilter {
    field_name: String,
    field_value: Value,
    mode: ComparisonMode,
}

impl ComparisonFilter {
    pub(crate) fn new(field_name: &str, field_value: Value, mode: ComparisonMode) -> Self {
        ComparisonFilter {
            field_name: field_name.to_string(),
            field_value,
            mode,
        }
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.field_name, self.mode, self.field_value)
    }
}

impl FilterProvider for ComparisonFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> bool {
        entry
            .get(&self.field_name)
            .and_then(|value| value.compare(&self.field_value))
            .map(|ordering| self.mode.accepts(ordering))
            .unwrap_or(false)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
