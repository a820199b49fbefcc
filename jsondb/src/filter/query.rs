use std::fmt::Display;
use std::sync::Arc;

use crate::collection::Document;
use crate::common::{Value, DOC_ID, OP_AND, OP_NOT, OP_OR, OP_WHERE};

use super::WherePredicate;

/// A declarative document filter.
///
/// A query level is a list of clauses that must all hold. A clause is keyed by
/// a field name, holding a literal or an operator set, or by one of the
/// combinators `$and`, `$or`, `$not` and `$where`.
///
/// The data part of a query is usually built from a [Value] (for instance one
/// decoded from JSON). A value that is not an object still converts, into
/// [Query::Malformed], and is reported when the query is evaluated. `$where`
/// predicates are code, so they can only be attached through the builder
/// methods.
///
/// # Examples
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::filter::Query;
///
/// // {age: {$gte: 18}, $or: [{role: "admin"}, {role: "owner"}]}
/// let query = Query::from(doc! { age: { "$gte": 18 } })
///     .or(vec![
///         Query::from(doc! { role: "admin" }),
///         Query::from(doc! { role: "owner" }),
///     ])
///     .where_fn(|doc| doc.contains_key("email"));
/// assert_eq!(query.clauses().len(), 3);
/// ```
#[derive(Clone)]
pub enum Query {
    /// Clauses that must all hold. An empty list matches every document.
    Clauses(Vec<(String, Term)>),
    /// A value that is not an object, kept so the error can name it.
    Malformed(Value),
}

/// The right-hand side of a query clause.
#[derive(Clone)]
pub enum Term {
    /// A literal, an operator set, or an operand of the wrong shape.
    Value(Value),
    /// Sub-queries of `$and` / `$or`.
    Queries(Vec<Query>),
    /// Sub-query of `$not`.
    Query(Box<Query>),
    /// Predicate of `$where`.
    Where(Arc<dyn WherePredicate>),
}

impl Term {
    /// Short description used in validation messages.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Term::Value(value) => value.kind_name(),
            Term::Queries(_) => "array",
            Term::Query(_) => "object",
            Term::Where(_) => "predicate",
        }
    }
}

impl Query {
    /// A query matching every document.
    pub fn all() -> Self {
        Query::Clauses(Vec::new())
    }

    /// A query matching the document with the given `_id`.
    pub fn by_id(id: &str) -> Self {
        Query::all().field(DOC_ID, id)
    }

    /// Adds a field clause: a literal to compare with, or an operator set.
    pub fn field<T: Into<Value>>(self, name: &str, value: T) -> Self {
        self.with_clause(name, Term::Value(value.into()))
    }

    /// Adds an `$and` clause.
    pub fn and(self, queries: Vec<Query>) -> Self {
        self.with_clause(OP_AND, Term::Queries(queries))
    }

    /// Adds an `$or` clause.
    pub fn or(self, queries: Vec<Query>) -> Self {
        self.with_clause(OP_OR, Term::Queries(queries))
    }

    /// Adds a `$not` clause.
    pub fn not(self, query: Query) -> Self {
        self.with_clause(OP_NOT, Term::Query(Box::new(query)))
    }

    /// Adds a `$where` clause evaluated against the whole document.
    pub fn where_fn<F>(self, predicate: F) -> Self
    where
        F: Fn(&Document) -> bool + Send + Sync + 'static,
    {
        self.with_clause(OP_WHERE, Term::Where(Arc::new(predicate)))
    }

    /// Adds a `$where` clause from a shared predicate.
    pub fn where_predicate(self, predicate: Arc<dyn WherePredicate>) -> Self {
        self.with_clause(OP_WHERE, Term::Where(predicate))
    }

    fn with_clause(self, key: &str, term: Term) -> Self {
        match self {
            Query::Clauses(mut clauses) => {
                clauses.push((key.to_string(), term));
                Query::Clauses(clauses)
            }
            malformed => malformed,
        }
    }

    /// The clauses of a well-formed query; empty for a malformed one.
    pub fn clauses(&self) -> &[(String, Term)] {
        match self {
            Query::Clauses(clauses) => clauses,
            Query::Malformed(_) => &[],
        }
    }

    /// Whether this query matches every document without evaluation.
    pub fn is_empty(&self) -> bool {
        matches!(self, Query::Clauses(clauses) if clauses.is_empty())
    }

    /// The id of a query that consists solely of `{_id: <string>}`.
    pub fn single_id(&self) -> Option<&str> {
        match self {
            Query::Clauses(clauses) if clauses.len() == 1 => match &clauses[0] {
                (key, Term::Value(Value::String(id))) if key == DOC_ID => Some(id.as_str()),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Query::all()
    }
}

impl From<Value> for Query {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(document) => Query::from(document),
            other => Query::Malformed(other),
        }
    }
}

impl From<Document> for Query {
    fn from(document: Document) -> Self {
        let clauses = document
            .into_iter()
            .map(|(key, value)| {
                let term = match (key.as_str(), value) {
                    (OP_AND | OP_OR, Value::Array(items)) => {
                        Term::Queries(items.into_iter().map(Query::from).collect())
                    }
                    (OP_NOT, Value::Object(sub)) => Term::Query(Box::new(Query::from(sub))),
                    (_, value) => Term::Value(value),
                };
                (key, term)
            })
            .collect();
        Query::Clauses(clauses)
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Malformed(value) => write!(f, "{}", value),
            Query::Clauses(clauses) => {
                write!(f, "{{")?;
                for (i, (key, term)) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", key)?;
                    match term {
                        Term::Value(value) => write!(f, "{}", value)?,
                        Term::Queries(queries) => {
                            write!(f, "[")?;
                            for (j, query) in queries.iter().enumerate() {
                                if j > 0 {
                                    write!(f, ", ")?;
                                }
                                write!(f, "{}", query)?;
                            }
                            write!(f, "]")?;
                        }
                        Term::Query(query) => write!(f, "{}", query)?,
                        Term::Where(_) => write!(f, "<predicate>")?,
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

impl std::fmt::Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
