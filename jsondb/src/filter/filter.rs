use std::any::Any;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use crate::collection::Document;
use crate::common::{
    Value, OP_AND, OP_EQ, OP_EXISTS, OP_GT, OP_GTE, OP_IN, OP_INCLUDES, OP_LT, OP_LTE, OP_NE,
    OP_NIN, OP_NOT, OP_OR, OP_REGEX, OP_TYPE, OP_WHERE,
};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};

use super::{
    AllFilter, AndFilter, ComparisonFilter, ComparisonMode, EqualsFilter, ExistsFilter,
    InFilter, IncludesFilter, NotEqualsFilter, NotFilter, NotInFilter, OrFilter, Query,
    RegexFilter, Term, TypeFilter, WhereFilter,
};

/// Trait for implementing document filters.
///
/// A `FilterProvider` is a validated, ready to run predicate. Operands are
/// checked once when a [Query] is compiled, so evaluation itself cannot fail.
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Whether the document matches.
    fn apply(&self, entry: &Document) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// A compiled query.
///
/// `Filter` wraps a shared [FilterProvider] and is cheap to clone.
///
/// # Examples
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::filter::{Filter, Query};
///
/// let filter = Filter::compile(&Query::from(doc! { age: { "$gt": 30 } })).unwrap();
/// assert!(filter.apply(&doc! { age: 31 }));
/// assert!(!filter.apply(&doc! { age: 30 }));
/// assert!(!filter.apply(&doc! { name: "no age" }));
/// ```
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    /// Validates a query and turns it into a filter.
    ///
    /// The whole query tree is checked before anything runs: a bad operand
    /// anywhere, even under a branch that evaluation would short-circuit, is
    /// reported as an [ErrorKind::QueryError].
    pub fn compile(query: &Query) -> JsonDbResult<Filter> {
        match query {
            Query::Malformed(value) => Err(query_error(&format!(
                "Query must be an object. Given: {}",
                value.kind_name()
            ))),
            Query::Clauses(clauses) => {
                let mut filters = Vec::with_capacity(clauses.len());
                for (key, term) in clauses {
                    filters.push(compile_clause(key, term)?);
                }
                Ok(match filters.len() {
                    0 => all(),
                    1 => filters.remove(0),
                    _ => and(filters),
                })
            }
        }
    }

    pub fn and(&self, filter: Filter) -> Self {
        and(vec![self.clone(), filter])
    }

    pub fn or(&self, filter: Filter) -> Self {
        or(vec![self.clone(), filter])
    }

    pub fn not(&self) -> Self {
        not(self.clone())
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// A filter matching every document.
#[inline]
pub fn all() -> Filter {
    Filter::new(AllFilter)
}

/// A filter matching only when every filter matches.
#[inline]
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// A filter matching when at least one filter matches.
#[inline]
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

#[inline]
pub fn not(filter: Filter) -> Filter {
    Filter::new(NotFilter::new(filter))
}

#[inline]
pub(crate) fn is_all_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AllFilter>()
}

fn query_error(message: &str) -> JsonDbError {
    JsonDbError::new(message, ErrorKind::QueryError)
}

fn compile_clause(key: &str, term: &Term) -> JsonDbResult<Filter> {
    match key {
        OP_AND | OP_OR => match term {
            Term::Queries(queries) => {
                let filters = queries
                    .iter()
                    .map(Filter::compile)
                    .collect::<JsonDbResult<Vec<_>>>()?;
                Ok(if key == OP_AND { and(filters) } else { or(filters) })
            }
            other => Err(query_error(&format!(
                "{} value must be an array of queries. Given: {}",
                key,
                other.describe()
            ))),
        },
        OP_NOT => match term {
            Term::Query(query) => Ok(not(Filter::compile(query)?)),
            other => Err(query_error(&format!(
                "{} value must be a query. Given: {}",
                key,
                other.describe()
            ))),
        },
        OP_WHERE => match term {
            Term::Where(predicate) => Ok(Filter::new(WhereFilter::new(predicate.clone()))),
            other => Err(query_error(&format!(
                "{} value must be a predicate. Given: {}",
                key,
                other.describe()
            ))),
        },
        field => match term {
            Term::Value(Value::Object(operators)) => compile_operators(field, operators),
            Term::Value(literal) => Ok(Filter::new(EqualsFilter::new(field, literal.clone()))),
            other => Err(query_error(&format!(
                "Field {} cannot hold a {}",
                field,
                other.describe()
            ))),
        },
    }
}

fn compile_operators(field: &str, operators: &Document) -> JsonDbResult<Filter> {
    let mut filters = Vec::with_capacity(operators.size());
    for (operator, operand) in operators.iter() {
        filters.push(compile_operator(field, operator, operand)?);
    }
    Ok(match filters.len() {
        0 => all(),
        1 => filters.remove(0),
        _ => and(filters),
    })
}

fn compile_operator(field: &str, operator: &str, operand: &Value) -> JsonDbResult<Filter> {
    let invalid = |expected: &str| {
        query_error(&format!(
            "{} operand for field {} must be {}. Given: {}",
            operator,
            field,
            expected,
            operand.kind_name()
        ))
    };

    match operator {
        OP_EXISTS => match operand {
            Value::Bool(flag) => Ok(Filter::new(ExistsFilter::new(field, *flag))),
            Value::Number(n) if *n == 0.0 || *n == 1.0 => {
                Ok(Filter::new(ExistsFilter::new(field, *n == 1.0)))
            }
            _ => Err(invalid("true, false, 0 or 1")),
        },
        OP_EQ => Ok(Filter::new(EqualsFilter::new(field, operand.clone()))),
        OP_NE => Ok(Filter::new(NotEqualsFilter::new(field, operand.clone()))),
        OP_LT | OP_LTE | OP_GT | OP_GTE => match operand {
            Value::Number(_) | Value::String(_) => {
                let mode = match operator {
                    OP_LT => ComparisonMode::Lesser,
                    OP_LTE => ComparisonMode::LesserEqual,
                    OP_GT => ComparisonMode::Greater,
                    _ => ComparisonMode::GreaterEqual,
                };
                Ok(Filter::new(ComparisonFilter::new(field, operand.clone(), mode)))
            }
            _ => Err(invalid("a number or a string")),
        },
        OP_IN | OP_NIN => match operand {
            Value::Array(values) if operator == OP_IN => {
                Ok(Filter::new(InFilter::new(field, values.clone())))
            }
            Value::Array(values) => Ok(Filter::new(NotInFilter::new(field, values.clone()))),
            _ => Err(invalid("an array")),
        },
        OP_INCLUDES => Ok(Filter::new(IncludesFilter::new(field, operand.clone()))),
        OP_TYPE => match operand {
            Value::String(kind) => Ok(Filter::new(TypeFilter::new(field, kind))),
            _ => Err(invalid("a string")),
        },
        OP_REGEX => match operand {
            Value::String(pattern) => Ok(Filter::new(RegexFilter::new(field, pattern)?)),
            _ => Err(invalid("a pattern string")),
        },
        unknown => Err(query_error(&format!(
            "Unknown query operator {} on field {}",
            unknown, field
        ))),
    }
}
