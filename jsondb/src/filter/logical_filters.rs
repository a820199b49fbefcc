use std::any::Any;
use std::fmt::Display;
use std::sync::Arc;

use crate::collection::Document;

use super::{Filter, FilterProvider};

/// A filter that applies logical AND operation on multiple filters.
///
/// Filters are evaluated in order and evaluation stops at the first one that
/// fails. An empty list is vacuously true.
pub(crate) struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut filters = String::with_capacity(self.filters.len() * 16);
        for (i, filter) in self.filters.iter().enumerate() {
            filters.push_str(&format!("{}", filter));
            if i < self.filters.len() - 1 {
                filters.push_str(" && ");
            }
        }
        write!(f, "({})", filters)
    }
}

impl FilterProvider for AndFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> bool {
        self.filters.iter().all(|filter| filter.apply(entry))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that applies logical OR operation on multiple filters.
///
/// Filters are evaluated in order and evaluation stops at the first one that
/// matches. An empty list never matches.
pub(crate) struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut filters = String::with_capacity(self.filters.len() * 16);
        for (i, filter) in self.filters.iter().enumerate() {
            filters.push_str(&format!("{}", filter));
            if i < self.filters.len() - 1 {
                filters.push_str(" || ");
            }
        }
        write!(f, "({})", filters)
    }
}

impl FilterProvider for OrFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> bool {
        self.filters.iter().any(|filter| filter.apply(entry))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A filter that negates another filter.
pub(crate) struct NotFilter {
    filter: Filter,
}

impl NotFilter {
    pub(crate) fn new(filter: Filter) -> Self {
        NotFilter { filter }
    }
}

impl Display for NotFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(not {})", self.filter)
    }
}

impl FilterProvider for NotFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> bool {
        !self.filter.apply(entry)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A caller supplied predicate over a whole document, used by `$where`.
///
/// Any `Fn(&Document) -> bool` that is `Send + Sync` is a predicate.
pub trait WherePredicate: Send + Sync {
    fn evaluate(&self, document: &Document) -> bool;
}

impl<F> WherePredicate for F
where
    F: Fn(&Document) -> bool + Send + Sync,
{
    fn evaluate(&self, document: &Document) -> bool {
        self(document)
    }
}

pub(crate) struct WhereFilter {
    predicate: Arc<dyn WherePredicate>,
}

impl WhereFilter {
    pub(crate) fn new(predicate: Arc<dyn WherePredicate>) -> Self {
        WhereFilter { predicate }
    }
}

impl Display for WhereFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(where <predicate>)")
    }
}

impl FilterProvider for WhereFilter {
    fn apply(&self, entry: &Document) -> bool {
        self.predicate.evaluate(entry)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
