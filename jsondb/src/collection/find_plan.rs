use crate::errors::JsonDbResult;
use crate::filter::{is_all_filter, Filter, Query};
use std::fmt::Display;

/// How a query is executed against a collection.
///
/// There are no indexes, so the only shortcuts are an empty query, which
/// selects every document without evaluating anything, and a query that is
/// exactly `{_id: <string>}`, which becomes a key lookup. Everything else is a
/// full scan with a compiled [Filter].
#[derive(Clone, Debug)]
pub enum FindPlan {
    All,
    ById(String),
    Scan(Filter),
}

impl FindPlan {
    /// Validates the query and picks the cheapest way to run it.
    pub fn create(query: &Query) -> JsonDbResult<FindPlan> {
        if query.is_empty() {
            return Ok(FindPlan::All);
        }

        if let Some(id) = query.single_id() {
            return Ok(FindPlan::ById(id.to_string()));
        }

        let filter = Filter::compile(query)?;
        if is_all_filter(&filter) {
            // e.g. {a: {}}, an empty operator set
            Ok(FindPlan::All)
        } else {
            Ok(FindPlan::Scan(filter))
        }
    }
}

impl Display for FindPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindPlan::All => write!(f, "all"),
            FindPlan::ById(id) => write!(f, "by id {}", id),
            FindPlan::Scan(filter) => write!(f, "scan {}", filter),
        }
    }
}
