//! Collections and documents.
//!
//! A [JsonCollection] holds schemaless [Document]s keyed by their `_id`. It
//! answers queries, applies update directives, generates ids on insert and
//! projects results, and it can persist itself to a JSON file through the
//! [store](crate::store) module.
//!
//! ```rust
//! use jsondb::collection::{multi, InsertOptions, JsonCollection};
//! use jsondb::doc;
//! use jsondb::filter::field;
//!
//! let mut tasks = JsonCollection::in_memory();
//! let id = tasks.insert(doc! { title: "write docs", done: false }, InsertOptions::default())
//!     .into_data()
//!     .unwrap();
//! assert_eq!(id.len(), 16);
//!
//! tasks.insert(doc! { title: "review", done: false }, InsertOptions::default());
//! let done = tasks.update(field("done").eq(false), doc! { "$set": { done: true } }, multi());
//! assert_eq!(*done.data(), 2);
//! ```
//!
//! # Documents
//!
//! Every stored document carries a non-empty string `_id`. A candidate without
//! one gets a random alphanumeric id from the collection's [IdGenerator].
//! Stored documents are never handed out directly: reads return copies, so
//! editing a result never changes the collection.
//!
//! # Write guards
//!
//! `remove` and `update` refuse to touch more than one document unless the
//! caller passes [multi()]. The refusal is reported as
//! [MultiMatchRejected](crate::errors::ErrorKind::MultiMatchRejected) and
//! nothing is modified.

mod document;
mod find_plan;
mod id_generator;
mod json_collection;
pub(crate) mod operation;
mod projection;
mod write_options;

pub use document::*;
pub use find_plan::*;
pub use id_generator::*;
pub use json_collection::*;
pub use operation::{apply_update, insert_document, select, select_one, UpdateOperator};
pub use projection::*;
pub use write_options::*;
