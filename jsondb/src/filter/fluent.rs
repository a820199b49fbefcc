use crate::collection::Document;
use crate::common::{
    Value, OP_EQ, OP_EXISTS, OP_GT, OP_GTE, OP_IN, OP_INCLUDES, OP_LT, OP_LTE, OP_NE, OP_NIN,
    OP_REGEX, OP_TYPE,
};

use super::Query;

/// Creates a fluent query builder for the specified field name.
///
/// Every method of the returned [FluentQuery] yields a one-clause [Query]
/// equivalent to the `{field: {$op: operand}}` form, so the result can be
/// combined with other queries through the [Query] builder methods.
///
/// # Examples
///
/// ```rust
/// use jsondb::doc;
/// use jsondb::filter::{field, Filter, Query};
///
/// let query = field("age").gte(18).and(vec![field("name").regex("^A")]);
/// let filter = Filter::compile(&query).unwrap();
/// assert!(filter.apply(&doc! { age: 30, name: "Ann" }));
/// assert!(!filter.apply(&doc! { age: 30, name: "Bob" }));
/// ```
pub fn field(field_name: &str) -> FluentQuery {
    FluentQuery {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for single-field query clauses.
pub struct FluentQuery {
    field_name: String,
}

impl FluentQuery {
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Query {
        self.operator(OP_EQ, value.into())
    }

    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Query {
        self.operator(OP_NE, value.into())
    }

    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Query {
        self.operator(OP_GT, value.into())
    }

    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Query {
        self.operator(OP_GTE, value.into())
    }

    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Query {
        self.operator(OP_LT, value.into())
    }

    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Query {
        self.operator(OP_LTE, value.into())
    }

    /// Matches when the field equals one of `values`.
    pub fn in_array<T: Into<Value>>(self, values: Vec<T>) -> Query {
        self.operator(OP_IN, Value::from(values))
    }

    /// Matches when the field is absent or equals none of `values`.
    pub fn not_in_array<T: Into<Value>>(self, values: Vec<T>) -> Query {
        self.operator(OP_NIN, Value::from(values))
    }

    pub fn exists(self, present: bool) -> Query {
        self.operator(OP_EXISTS, Value::from(present))
    }

    /// Substring test on strings, element test on arrays.
    pub fn includes<T: Into<Value>>(self, value: T) -> Query {
        self.operator(OP_INCLUDES, value.into())
    }

    /// Matches on the kind name of the field (`"undefined"` when absent).
    pub fn of_type(self, kind: &str) -> Query {
        self.operator(OP_TYPE, Value::from(kind))
    }

    pub fn regex(self, pattern: &str) -> Query {
        self.operator(OP_REGEX, Value::from(pattern))
    }

    fn operator(self, operator: &str, operand: Value) -> Query {
        let mut operators = Document::new();
        operators.put(operator, operand);
        Query::all().field(&self.field_name, operators)
    }
}
