use crate::errors::{JsonDbError, JsonDbResult};

/// The result of a collection operation.
///
/// Store operations never abort the caller on a malformed input. They return a
/// well-typed `data` value, neutral when the operation could not run (an empty
/// list, zero, `None`), together with every recoverable error met on the way.
///
/// # Examples
///
/// ```rust
/// use jsondb::collection::JsonCollection;
/// use jsondb::common::Value;
/// use jsondb::filter::Query;
///
/// let collection = JsonCollection::in_memory();
/// let outcome = collection.count(Query::from(Value::from(vec![1, 2])));
/// assert_eq!(*outcome.data(), 0);
/// assert!(outcome.has_errors());
/// ```
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    data: T,
    errors: Vec<JsonDbError>,
}

impl<T> Outcome<T> {
    /// Creates an error-free outcome.
    pub fn ok(data: T) -> Self {
        Outcome {
            data,
            errors: Vec::new(),
        }
    }

    /// Creates an outcome carrying a neutral value and one error.
    pub fn failed(data: T, error: JsonDbError) -> Self {
        Outcome {
            data,
            errors: vec![error],
        }
    }

    pub(crate) fn with_errors(data: T, errors: Vec<JsonDbError>) -> Self {
        Outcome { data, errors }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn errors(&self) -> &[JsonDbError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The first error reported, if any.
    pub fn error(&self) -> Option<&JsonDbError> {
        self.errors.first()
    }

    /// Splits the outcome into its data and errors.
    pub fn into_parts(self) -> (T, Vec<JsonDbError>) {
        (self.data, self.errors)
    }

    pub fn into_data(self) -> T {
        self.data
    }

    /// Converts into a `Result`, failing with the first error when any was
    /// reported even though data is present.
    pub fn into_result(self) -> JsonDbResult<T> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            data: f(self.data),
            errors: self.errors,
        }
    }
}
