use crate::collection::{DocumentMap, IdGenerator};
use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};

/// Validates `candidate` and stores a copy of it in `documents`.
///
/// - the candidate must be an object ([ErrorKind::ValidationError]);
/// - a supplied `_id` must be a non-empty string ([ErrorKind::InvalidId]) that
///   is not already taken ([ErrorKind::UniqueConstraintViolation]);
/// - without `_id`, a fresh one is drawn from `generator` and set on the
///   stored copy.
///
/// On error the collection is left untouched. The stored document never
/// shares state with the caller's value.
///
/// ```rust
/// use jsondb::collection::{insert_document, DocumentMap, IdGenerator};
/// use jsondb::common::Value;
/// use jsondb::doc;
///
/// let mut documents = DocumentMap::new();
/// let id = insert_document(&mut documents, &Value::from(doc! { a: 1 }), &IdGenerator::default())
///     .unwrap();
/// assert_eq!(id.len(), 16);
/// assert_eq!(documents[&id].id(), Some(id.as_str()));
/// ```
pub fn insert_document(
    documents: &mut DocumentMap,
    candidate: &Value,
    generator: &IdGenerator,
) -> JsonDbResult<String> {
    let candidate = match candidate {
        Value::Object(candidate) => candidate,
        other => {
            log::error!("Cannot insert a {}, documents must be objects", other.kind_name());
            return Err(JsonDbError::new(
                &format!("Document must be an object. Given: {}", other.kind_name()),
                ErrorKind::ValidationError,
            ));
        }
    };

    let id = match candidate.get(DOC_ID) {
        Some(Value::String(id)) if !id.is_empty() => {
            if documents.contains_key(id) {
                log::error!("Document already exists with id {}", id);
                return Err(JsonDbError::new(
                    &format!("_id is not unique: {}", id),
                    ErrorKind::UniqueConstraintViolation,
                ));
            }
            id.clone()
        }
        Some(other) => {
            log::error!("Invalid _id {} in inserted document", other);
            return Err(JsonDbError::new(
                &format!("_id must be a non-empty string. Given: {}", other),
                ErrorKind::InvalidId,
            ));
        }
        None => generator.unique_id(|id| documents.contains_key(id))?,
    };

    let mut stored = candidate.clone();
    stored.put(DOC_ID, id.as_str());
    documents.insert(id.clone(), stored);
    Ok(id)
}
