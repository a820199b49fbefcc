use regex::Regex;
use std::any::Any;
use std::fmt::Display;

use crate::collection::Document;
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};

use super::FilterProvider;

/// A filter that matches documents using regular expressions.
///
/// The pattern is compiled once when the filter is built; an invalid pattern
/// is a query error. A match is searched anywhere in the field (use anchors
/// for a full match). String fields are matched directly; number and boolean
/// fields through their textual form (`42`, `1.5`, `true`). Any other field,
/// or an absent one, never matches.
pub(crate) struct RegexFilter {
    field_name: String,
    pattern: Regex,
}

impl RegexFilter {
    pub(crate) fn new(field_name: &str, pattern: &str) -> JsonDbResult<Self> {
        match Regex::new(pattern) {
            Ok(regex) => Ok(RegexFilter {
                field_name: field_name.to_string(),
                pattern: regex,
            }),
            Err(err) => Err(JsonDbError::new(
                &format!("Invalid $regex pattern for field {}: {}", field_name, err),
                ErrorKind::QueryError,
            )),
        }
    }
}

impl Display for RegexFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} regex {})", self.field_name, self.pattern.as_str())
    }
}

impl FilterProvider for RegexFilter {
    fn apply(&self, entry: &Document) -> bool {
        match entry.get(&self.field_name) {
            Some(value) => match value.as_string() {
                Some(text) => self.pattern.is_match(text),
                None => value
                    .to_text()
                    .map(|text| self.pattern.is_match(&text))
                    .unwrap_or(false),
            },
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
