use std::path::{Path, PathBuf};

use crate::collection::{
    apply_update, insert_document, select, select_one, Document, DocumentMap, IdGenerator,
    InsertOptions, ModifyOptions, Projection,
};
use crate::collection_builder::CollectionBuilder;
use crate::collection_config::CollectionConfig;
use crate::common::{Outcome, Value};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::filter::Query;
use crate::store::{load_documents, FileWriter, SaveOutcome};

/// A collection of JSON documents, optionally persisted to a file.
///
/// Reads and writes are synchronous and run to completion against the
/// in-memory documents. After a successful mutation the collection asks its
/// [FileWriter] to flush a snapshot to disk; that write runs in the
/// background and never blocks the caller.
///
/// Every operation returns an [Outcome]: the result, neutral when the input was
/// rejected (`0`, an empty list, `None`), and the recoverable errors met on
/// the way. Nothing is ever thrown at the caller.
///
/// # Examples
///
/// ```rust
/// use jsondb::collection::{JsonCollection, InsertOptions, ModifyOptions};
/// use jsondb::doc;
/// use jsondb::filter::{field, Query};
///
/// let mut users = JsonCollection::in_memory();
/// users.insert(doc! { _id: "alice", age: 30 }, InsertOptions::default());
/// users.insert(doc! { _id: "bob", age: 25 }, InsertOptions::default());
///
/// assert_eq!(*users.count(field("age").gt(20)).data(), 2);
///
/// let updated = users.update(
///     Query::by_id("bob"),
///     doc! { "$inc": { age: 1 } },
///     ModifyOptions::default(),
/// );
/// assert_eq!(*updated.data(), 1);
///
/// let bob = users.find_one(Query::by_id("bob"), None).into_data().unwrap();
/// assert_eq!(bob.get("age").and_then(|v| v.as_number()), Some(26.0));
/// ```
pub struct JsonCollection {
    documents: DocumentMap,
    file_path: Option<PathBuf>,
    id_generator: IdGenerator,
    writer: FileWriter,
}

impl JsonCollection {
    /// Creates a builder to configure and open a collection.
    pub fn builder() -> CollectionBuilder {
        CollectionBuilder::new()
    }

    /// Creates an empty collection that is never written to disk.
    pub fn in_memory() -> Self {
        JsonCollection::with_documents(CollectionConfig::default(), DocumentMap::new())
    }

    /// Opens the collection persisted at `path` with default settings.
    ///
    /// A missing or empty file yields an empty collection.
    pub fn open<P: AsRef<Path>>(path: P) -> JsonDbResult<Self> {
        CollectionBuilder::new().file_path(path).open()
    }

    pub(crate) fn from_config(config: CollectionConfig) -> JsonDbResult<Self> {
        let documents = match config.file_path() {
            Some(path) => load_documents(path)?,
            None => DocumentMap::new(),
        };
        Ok(JsonCollection::with_documents(config, documents))
    }

    fn with_documents(config: CollectionConfig, documents: DocumentMap) -> Self {
        JsonCollection {
            documents,
            id_generator: IdGenerator::new(config.id_length()),
            file_path: config.file_path().map(Path::to_path_buf),
            writer: config.writer(),
        }
    }

    /// Number of documents matching `query`.
    pub fn count<Q: Into<Query>>(&self, query: Q) -> Outcome<usize> {
        match select(&self.documents, &query.into()) {
            Ok(ids) => Outcome::ok(ids.len()),
            Err(err) => Outcome::failed(0, err),
        }
    }

    /// Documents matching `query`, in id order, each projected through
    /// `projection` when one is given.
    pub fn find<Q: Into<Query>>(&self, query: Q, projection: Option<&Value>) -> Outcome<Vec<Document>> {
        let projection = match compile_projection(projection) {
            Ok(projection) => projection,
            Err(err) => return Outcome::failed(Vec::new(), err),
        };

        match select(&self.documents, &query.into()) {
            Ok(ids) => Outcome::ok(
                ids.iter()
                    .filter_map(|id| self.documents.get(id))
                    .map(|document| projection.apply(document))
                    .collect(),
            ),
            Err(err) => Outcome::failed(Vec::new(), err),
        }
    }

    /// The first document matching `query`, projected through `projection`.
    pub fn find_one<Q: Into<Query>>(&self, query: Q, projection: Option<&Value>) -> Outcome<Option<Document>> {
        let projection = match compile_projection(projection) {
            Ok(projection) => projection,
            Err(err) => return Outcome::failed(None, err),
        };

        match select_one(&self.documents, &query.into()) {
            Ok(id) => Outcome::ok(
                id.and_then(|id| self.documents.get(&id))
                    .map(|document| projection.apply(document)),
            ),
            Err(err) => Outcome::failed(None, err),
        }
    }

    /// Inserts a copy of `candidate` and returns its id.
    pub fn insert<V: Into<Value>>(&mut self, candidate: V, options: InsertOptions) -> Outcome<Option<String>> {
        match insert_document(&mut self.documents, &candidate.into(), &self.id_generator) {
            Ok(id) => {
                if !options.is_skip_save() {
                    self.save();
                }
                Outcome::ok(Some(id))
            }
            Err(err) => Outcome::failed(None, err),
        }
    }

    /// Removes the documents matching `query` and returns how many went.
    pub fn remove<Q: Into<Query>>(&mut self, query: Q, options: ModifyOptions) -> Outcome<usize> {
        let ids = match self.select_targets(&query.into(), &options) {
            Ok(ids) => ids,
            Err(err) => return Outcome::failed(0, err),
        };

        let removed = ids
            .iter()
            .filter_map(|id| self.documents.remove(id))
            .count();

        if removed > 0 && !options.is_skip_save() {
            self.save();
        }
        Outcome::ok(removed)
    }

    /// Applies `directive` to the documents matching `query` and returns how
    /// many of them changed.
    pub fn update<Q, V>(&mut self, query: Q, directive: V, options: ModifyOptions) -> Outcome<usize>
    where
        Q: Into<Query>,
        V: Into<Value>,
    {
        let directive = directive.into();
        if !directive.is_document() {
            log::error!("Update directive must be an object, found {}", directive.kind_name());
            return Outcome::failed(
                0,
                JsonDbError::new(
                    &format!("Update directive must be an object. Given: {}", directive.kind_name()),
                    ErrorKind::UpdateError,
                ),
            );
        }

        let ids = match self.select_targets(&query.into(), &options) {
            Ok(ids) => ids,
            Err(err) => return Outcome::failed(0, err),
        };

        let mut updated = 0;
        let mut errors = Vec::new();
        for id in ids {
            if let Some(document) = self.documents.get_mut(&id) {
                let (changed, rejected) = apply_update(document, &directive).into_parts();
                if changed {
                    updated += 1;
                }
                errors.extend(rejected);
            }
        }

        if updated > 0 && !options.is_skip_save() {
            self.save();
        }
        Outcome::with_errors(updated, errors)
    }

    /// Resolves the documents a remove or update may touch, refusing a
    /// multi-document match unless `multi` is set.
    fn select_targets(&self, query: &Query, options: &ModifyOptions) -> JsonDbResult<Vec<String>> {
        let ids = select(&self.documents, query)?;
        if ids.len() > 1 && !options.is_multi() {
            log::error!(
                "Query {} matched {} documents, refusing to modify them without multi",
                query,
                ids.len()
            );
            return Err(JsonDbError::new(
                &format!(
                    "Query matched {} documents but multi is not set, nothing was modified",
                    ids.len()
                ),
                ErrorKind::MultiMatchRejected,
            ));
        }
        Ok(ids)
    }

    /// Flushes the collection to its file. Failures are logged.
    ///
    /// Does nothing for an in-memory collection.
    pub fn save(&self) {
        if self.file_path.is_none() {
            return;
        }
        self.save_with(|result| match result {
            Ok(outcome) => log::debug!("Save {}", outcome),
            Err(err) => log::error!("Save failed: {}", err),
        });
    }

    /// Flushes the collection to its file and reports the result to
    /// `callback`, possibly from a background thread.
    ///
    /// An in-memory collection has nothing to flush: the callback receives an
    /// [ErrorKind::InvalidOperation] error.
    pub fn save_with<F>(&self, callback: F)
    where
        F: FnOnce(JsonDbResult<SaveOutcome>) + Send + 'static,
    {
        match &self.file_path {
            Some(path) => self.writer.write(path, &self.documents, callback),
            None => callback(Err(JsonDbError::new(
                "In-memory collection has no file to save to",
                ErrorKind::InvalidOperation,
            ))),
        }
    }

    /// Flushes the collection and waits until its file is written.
    pub fn close(&self) {
        if let Some(path) = &self.file_path {
            self.save();
            self.writer.wait_idle(path);
        }
    }

    /// Number of documents.
    pub fn size(&self) -> usize {
        self.documents.len()
    }

    pub fn is_in_memory(&self) -> bool {
        self.file_path.is_none()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// A point in time copy of the documents. O(1), shares structure.
    pub fn snapshot(&self) -> DocumentMap {
        self.documents.clone()
    }
}

fn compile_projection(projection: Option<&Value>) -> JsonDbResult<Projection> {
    match projection {
        Some(spec) => Projection::compile(spec),
        None => Ok(Projection::Full),
    }
}
