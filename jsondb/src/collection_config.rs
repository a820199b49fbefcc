//! Configuration of a collection before it is opened.

use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};

use crate::common::DEFAULT_ID_LENGTH;
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::store::FileWriter;
use crate::WRITER;

/// Settings a [JsonCollection](crate::collection::JsonCollection) is opened with.
///
/// The defaults describe an in-memory collection generating 16 character ids
/// and sharing the process wide [FileWriter].
#[derive(Clone)]
pub struct CollectionConfig {
    file_path: Option<PathBuf>,
    id_length: usize,
    writer: FileWriter,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionConfig {
    pub fn new() -> Self {
        CollectionConfig {
            file_path: None,
            id_length: DEFAULT_ID_LENGTH,
            writer: WRITER.clone(),
        }
    }

    /// The file the collection is persisted to, `None` when in memory.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Sets the backing file.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::ValidationError] for an empty path.
    pub fn set_file_path(&mut self, path: &Path) -> JsonDbResult<()> {
        if path.as_os_str().is_empty() {
            log::error!("Collection file path cannot be empty");
            return Err(JsonDbError::new(
                "Collection file path cannot be empty",
                ErrorKind::ValidationError,
            ));
        }
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    pub(crate) fn clear_file_path(&mut self) {
        self.file_path = None;
    }

    /// Length of generated ids.
    pub fn id_length(&self) -> usize {
        self.id_length
    }

    /// Sets the length of generated ids.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::ValidationError] when `length` is zero.
    pub fn set_id_length(&mut self, length: usize) -> JsonDbResult<()> {
        if length == 0 {
            log::error!("Id length must be at least 1");
            return Err(JsonDbError::new(
                "Id length must be at least 1",
                ErrorKind::ValidationError,
            ));
        }
        self.id_length = length;
        Ok(())
    }

    /// The writer saves go through.
    pub fn writer(&self) -> FileWriter {
        self.writer.clone()
    }

    pub fn set_writer(&mut self, writer: FileWriter) {
        self.writer = writer;
    }
}

impl Debug for CollectionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionConfig")
            .field("file_path", &self.file_path)
            .field("id_length", &self.id_length)
            .finish()
    }
}
