//! Persistence of collections to JSON files.
//!
//! A collection is persisted as a single UTF-8 JSON object mapping each id to
//! its document. Saving goes through a [FileWriter], which coalesces
//! overlapping save requests per path, and a [FileSink], which puts the bytes
//! on disk ([DiskSink] by default). Loading is a plain read through
//! [load_documents].
//!
//! ```rust
//! use std::sync::Arc;
//! use jsondb::store::{load_documents, FileWriter, DiskSink, SaveOutcome};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("db.json");
//! let writer = FileWriter::new(Arc::new(DiskSink));
//!
//! let snapshot = serde_json::json!({ "a": { "_id": "a", "n": 1 } });
//! writer.write(&path, &snapshot, |result| {
//!     assert_eq!(result.ok(), Some(SaveOutcome::Written));
//! });
//! writer.wait_idle(&path);
//!
//! assert_eq!(load_documents(&path).unwrap().len(), 1);
//! ```

mod file;
mod sink;
mod writer;

pub use file::*;
pub use sink::*;
pub use writer::*;
