use crate::collection::Document;
use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};

/// A validated projection spec.
///
/// A spec maps field names to flags. Truthy flags make it inclusive, falsy
/// flags exclusive; mixing both is an error. `_id` is exempt from the mixing
/// rule: an inclusive projection keeps `_id` unless it is given a falsy flag,
/// and an exclusive one may drop it too.
///
/// # Examples
///
/// ```rust
/// use jsondb::collection::Projection;
/// use jsondb::common::Value;
/// use jsondb::doc;
///
/// let doc = doc! { _id: "foo", a: 1, b: 2, c: 3 };
///
/// let include = Projection::compile(&Value::from(doc! { a: 1 })).unwrap();
/// assert_eq!(include.apply(&doc), doc! { _id: "foo", a: 1 });
///
/// let exclude = Projection::compile(&Value::from(doc! { a: 0 })).unwrap();
/// assert_eq!(exclude.apply(&doc), doc! { _id: "foo", b: 2, c: 3 });
///
/// assert!(Projection::compile(&Value::from(doc! { a: 1, b: 0 })).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// The whole document.
    Full,
    /// Only the named fields that exist, plus `_id` when `with_id` is set.
    Include { fields: Vec<String>, with_id: bool },
    /// Every field except the named ones.
    Exclude { fields: Vec<String> },
}

impl Projection {
    /// Validates a projection spec.
    pub fn compile(spec: &Value) -> JsonDbResult<Projection> {
        let spec = match spec {
            Value::Object(spec) => spec,
            other => {
                log::error!("Projection must be an object, found {}", other.kind_name());
                return Err(JsonDbError::new(
                    &format!("Projection must be an object. Given: {}", other.kind_name()),
                    ErrorKind::ProjectionError,
                ));
            }
        };

        if spec.is_empty() {
            return Ok(Projection::Full);
        }

        let mut included = Vec::new();
        let mut excluded = Vec::new();
        for (field, flag) in spec.iter() {
            if field == DOC_ID {
                continue;
            }
            if flag.is_truthy() {
                included.push(field.clone());
            } else {
                excluded.push(field.clone());
            }
        }

        if !included.is_empty() && !excluded.is_empty() {
            log::error!("Projection {} mixes included and excluded fields", spec);
            return Err(JsonDbError::new(
                &format!(
                    "Projection cannot mix included fields {:?} with excluded fields {:?}",
                    included, excluded
                ),
                ErrorKind::ProjectionError,
            ));
        }

        let id_flag = spec.get(DOC_ID).map(|flag| flag.is_truthy());
        if !included.is_empty() || id_flag == Some(true) {
            Ok(Projection::Include {
                fields: included,
                with_id: id_flag != Some(false),
            })
        } else {
            if id_flag == Some(false) {
                excluded.push(DOC_ID.to_string());
            }
            Ok(Projection::Exclude { fields: excluded })
        }
    }

    /// Builds the projected copy of `document`.
    pub fn apply(&self, document: &Document) -> Document {
        match self {
            Projection::Full => document.clone(),
            Projection::Include { fields, with_id } => {
                let mut projected = Document::new();
                if *with_id {
                    if let Some(id) = document.get(DOC_ID) {
                        projected.put(DOC_ID, id.clone());
                    }
                }
                for field in fields {
                    if let Some(value) = document.get(field) {
                        projected.put(field.as_str(), value.clone());
                    }
                }
                projected
            }
            Projection::Exclude { fields } => {
                let mut projected = document.clone();
                for field in fields {
                    projected.remove(field);
                }
                projected
            }
        }
    }
}

/// Validates `spec` and projects a single document.
pub fn project(document: &Document, spec: &Value) -> JsonDbResult<Document> {
    Projection::compile(spec).map(|projection| projection.apply(document))
}
