//! # jsondb - embedded JSON document store
//!
//! jsondb keeps collections of schemaless JSON documents in memory and can
//! persist each collection to a single JSON file. It answers Mongo-style
//! queries, applies update directives, projects results and generates random
//! ids for inserted documents.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsondb::collection::{multi, InsertOptions, JsonCollection};
//! use jsondb::doc;
//! use jsondb::filter::{field, Query};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut books = JsonCollection::open(dir.path().join("books.json")).unwrap();
//!
//! books.insert(doc! { _id: "b1", title: "Dune", year: 1965 }, InsertOptions::default());
//! books.insert(doc! { _id: "b2", title: "Hyperion", year: 1989 }, InsertOptions::default());
//!
//! let old = books.find(field("year").lt(1970), None).into_data();
//! assert_eq!(old.len(), 1);
//!
//! books.update(Query::all(), doc! { "$set": { read: true } }, multi());
//! books.close();
//!
//! let reopened = JsonCollection::open(dir.path().join("books.json")).unwrap();
//! assert_eq!(*reopened.count(doc! { read: true }).data(), 2);
//! ```
//!
//! ## Reporting
//!
//! Collection operations never panic and never return `Err`. They return an
//! [Outcome](common::Outcome): the result plus the recoverable errors met on
//! the way. Fallible setup (opening a file, configuring a builder) returns
//! [JsonDbResult](errors::JsonDbResult).
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, the collection facade and its engines
//! - [`common`] - The value model, outcomes and shared constants
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Queries and the filters they compile to
//! - [`store`] - Loading and coalesced saving of collection files
//! - [`registry`] - Shared access to named collections
//! - [`collection_builder`] - Builder for collections
//! - [`collection_config`] - Collection settings

use std::sync::LazyLock;

use crate::store::FileWriter;

pub mod collection;
pub mod collection_builder;
pub mod collection_config;
pub mod common;
pub mod errors;
pub mod filter;
pub mod registry;
pub mod store;

/// Writer shared by every collection that is not given its own, so two
/// collections on the same file coalesce their saves.
pub(crate) static WRITER: LazyLock<FileWriter> = LazyLock::new(FileWriter::default);
