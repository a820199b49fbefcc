use crate::collection::Document;
use crate::common::{Outcome, Value, DOC_ID, OP_INC, OP_PUSH, OP_RENAME, OP_SET, OP_UNSET};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use std::fmt::Display;

/// The field-level mutations an update directive can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    Inc,
    Push,
    Rename,
    Set,
    Unset,
}

impl UpdateOperator {
    pub fn parse(name: &str) -> Option<UpdateOperator> {
        match name {
            OP_INC => Some(UpdateOperator::Inc),
            OP_PUSH => Some(UpdateOperator::Push),
            OP_RENAME => Some(UpdateOperator::Rename),
            OP_SET => Some(UpdateOperator::Set),
            OP_UNSET => Some(UpdateOperator::Unset),
            _ => None,
        }
    }

    /// Applies this operator to one field.
    ///
    /// Returns whether the document changed. A rejected field leaves the
    /// document untouched.
    fn apply(&self, document: &mut Document, field: &str, argument: &Value) -> JsonDbResult<bool> {
        match self {
            UpdateOperator::Inc => inc(document, field, argument),
            UpdateOperator::Push => push(document, field, argument),
            UpdateOperator::Rename => rename(document, field, argument),
            UpdateOperator::Set => {
                document.put(field, argument.clone());
                Ok(true)
            }
            UpdateOperator::Unset => {
                if argument.is_truthy() && document.contains_key(field) {
                    document.remove(field);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }
}

impl Display for UpdateOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateOperator::Inc => write!(f, "{}", OP_INC),
            UpdateOperator::Push => write!(f, "{}", OP_PUSH),
            UpdateOperator::Rename => write!(f, "{}", OP_RENAME),
            UpdateOperator::Set => write!(f, "{}", OP_SET),
            UpdateOperator::Unset => write!(f, "{}", OP_UNSET),
        }
    }
}

fn update_error(message: String) -> JsonDbError {
    log::error!("{}", message);
    JsonDbError::new(&message, ErrorKind::UpdateError)
}

fn inc(document: &mut Document, field: &str, argument: &Value) -> JsonDbResult<bool> {
    let delta = match argument.as_number() {
        Some(delta) => delta,
        None => {
            return Err(update_error(format!(
                "$inc delta for field {} must be a number. Given: {}",
                field,
                argument.kind_name()
            )))
        }
    };

    match document.get_mut(field) {
        None => {
            document.put(field, delta);
            Ok(true)
        }
        Some(Value::Number(current)) => {
            *current += delta;
            Ok(true)
        }
        Some(other) => Err(update_error(format!(
            "$inc cannot modify field {} of type {}",
            field,
            other.kind_name()
        ))),
    }
}

fn push(document: &mut Document, field: &str, argument: &Value) -> JsonDbResult<bool> {
    match document.get_mut(field) {
        None => {
            document.put(field, Value::Array(vec![argument.clone()]));
            Ok(true)
        }
        Some(Value::Array(items)) => {
            items.push(argument.clone());
            Ok(true)
        }
        Some(other) => Err(update_error(format!(
            "$push cannot append to field {} of type {}",
            field,
            other.kind_name()
        ))),
    }
}

fn rename(document: &mut Document, field: &str, argument: &Value) -> JsonDbResult<bool> {
    let new_name = match argument.as_string() {
        Some(name) => name,
        None => {
            return Err(update_error(format!(
                "$rename target for field {} must be a string. Given: {}",
                field,
                argument.kind_name()
            )))
        }
    };

    if document.contains_key(new_name) {
        return Err(update_error(format!(
            "$rename cannot move field {} onto existing field {}",
            field, new_name
        )));
    }

    match document.remove(field) {
        Some(value) => {
            document.put(new_name, value);
            Ok(true)
        }
        None => Err(update_error(format!(
            "$rename source field {} does not exist",
            field
        ))),
    }
}

/// Applies an update directive to a document in place.
///
/// Every operator and every field is processed independently: one rejected
/// field never blocks its siblings. `_id` is rejected for every operator.
/// The outcome data is `true` when at least one field actually changed, and
/// the errors list every rejected operator or field.
///
/// Operators run in the sorted order of their names (`$inc`, `$push`,
/// `$rename`, `$set`, `$unset`), not in the order they were written, so a
/// `$rename` never sees a field created by a `$set` of the same directive.
///
/// # Examples
///
/// ```rust
/// use jsondb::collection::apply_update;
/// use jsondb::common::Value;
/// use jsondb::doc;
///
/// let mut doc = doc! { _id: "foo", name: "foo", count: 1 };
/// let outcome = apply_update(&mut doc, &Value::from(doc! {
///     "$inc": { count: 2, name: 1 },
///     "$push": { tags: "new" },
/// }));
///
/// assert!(*outcome.data());
/// assert_eq!(outcome.errors().len(), 1);
/// assert_eq!(doc, doc! { _id: "foo", name: "foo", count: 3, tags: ["new"] });
/// ```
pub fn apply_update(document: &mut Document, directive: &Value) -> Outcome<bool> {
    let directive = match directive {
        Value::Object(directive) => directive,
        other => {
            return Outcome::failed(
                false,
                update_error(format!(
                    "Update directive must be an object. Given: {}",
                    other.kind_name()
                )),
            )
        }
    };

    let mut changed = false;
    let mut errors = Vec::new();

    for (name, operand) in directive.iter() {
        let operator = match UpdateOperator::parse(name) {
            Some(operator) => operator,
            None => {
                errors.push(update_error(format!("Unknown update operator {}", name)));
                continue;
            }
        };

        let fields = match operand {
            Value::Object(fields) => fields,
            other => {
                errors.push(update_error(format!(
                    "{} operand must be an object of fields. Given: {}",
                    operator,
                    other.kind_name()
                )));
                continue;
            }
        };

        for (field, argument) in fields.iter() {
            if field == DOC_ID {
                errors.push(update_error(format!("{} cannot modify {}", operator, DOC_ID)));
                continue;
            }

            match operator.apply(document, field, argument) {
                Ok(true) => changed = true,
                Ok(false) => {}
                Err(err) => errors.push(err),
            }
        }
    }

    Outcome::with_errors(changed, errors)
}
