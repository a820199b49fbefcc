use std::path::Path;
use std::sync::Arc;

use crate::collection::JsonCollection;
use crate::collection_config::CollectionConfig;
use crate::errors::{JsonDbError, JsonDbResult};
use crate::store::{FileSink, FileWriter};

/// Builder for [JsonCollection].
///
/// Setters never fail on their own. The first invalid setting is remembered
/// and returned by [open](CollectionBuilder::open), later settings are
/// ignored once an error has been recorded.
///
/// # Examples
///
/// ```rust
/// use jsondb::collection::JsonCollection;
///
/// let dir = tempfile::tempdir().unwrap();
/// let collection = JsonCollection::builder()
///     .file_path(dir.path().join("users.json"))
///     .id_length(8)
///     .open()
///     .unwrap();
/// assert!(!collection.is_in_memory());
///
/// let rejected = JsonCollection::builder().id_length(0).open();
/// assert!(rejected.is_err());
/// ```
#[derive(Default)]
pub struct CollectionBuilder {
    error: Option<JsonDbError>,
    config: CollectionConfig,
}

impl CollectionBuilder {
    pub fn new() -> Self {
        CollectionBuilder {
            error: None,
            config: CollectionConfig::new(),
        }
    }

    /// Persists the collection to `path`, loading it first if it exists.
    pub fn file_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_file_path(path.as_ref()) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Keeps the collection in memory only. This is the default.
    pub fn in_memory(mut self) -> Self {
        self.config.clear_file_path();
        self
    }

    /// Length of the ids generated for documents inserted without one.
    pub fn id_length(mut self, length: usize) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_id_length(length) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Saves through `writer` instead of the shared one.
    pub fn writer(mut self, writer: FileWriter) -> Self {
        self.config.set_writer(writer);
        self
    }

    /// Saves through a dedicated writer over `sink`.
    pub fn sink(self, sink: Arc<dyn FileSink>) -> Self {
        self.writer(FileWriter::new(sink))
    }

    /// Opens the collection.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded by a setter, or the load error of a
    /// backing file that cannot be read or decoded.
    pub fn open(self) -> JsonDbResult<JsonCollection> {
        if let Some(error) = self.error {
            return Err(error);
        }
        JsonCollection::from_config(self.config)
    }
}
