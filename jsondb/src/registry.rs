//! Shared access to named collections.

use std::path::Path;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::collection::JsonCollection;
use crate::errors::JsonDbResult;

/// A collection handed out by a [Registry].
pub type SharedCollection = Arc<Mutex<JsonCollection>>;

/// Maps names to open collections so that every caller asking for the same
/// name works on the same [JsonCollection].
///
/// A registry is an ordinary value: create one per application (or per test)
/// and pass it where it is needed.
///
/// ```rust
/// use jsondb::collection::InsertOptions;
/// use jsondb::doc;
/// use jsondb::registry::Registry;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("users.json");
/// let registry = Registry::new();
///
/// let users = registry.collection(&path, Some("users")).unwrap();
/// users.lock().insert(doc! { _id: "alice" }, InsertOptions::default());
///
/// let again = registry.get("users").unwrap();
/// assert_eq!(again.lock().size(), 1);
/// registry.close_all();
/// ```
#[derive(Default)]
pub struct Registry {
    collections: DashMap<String, SharedCollection>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            collections: DashMap::new(),
        }
    }

    /// Returns the collection registered under `tag`, or under `path` when no
    /// tag is given, opening the file on first use.
    ///
    /// # Errors
    ///
    /// Returns the load error when the file has to be opened and cannot be
    /// read or decoded. Nothing is registered in that case.
    pub fn collection<P: AsRef<Path>>(&self, path: P, tag: Option<&str>) -> JsonDbResult<SharedCollection> {
        let path = path.as_ref();
        let name = match tag {
            Some(tag) => tag.to_string(),
            None => path.to_string_lossy().into_owned(),
        };

        match self.collections.entry(name) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let collection = JsonCollection::open(path)?;
                log::debug!("Registered collection {} at {}", entry.key(), path.display());
                Ok(entry.insert(Arc::new(Mutex::new(collection))).clone())
            }
        }
    }

    /// A fresh in-memory collection. It is not registered.
    pub fn memory(&self) -> SharedCollection {
        Arc::new(Mutex::new(JsonCollection::in_memory()))
    }

    /// Looks up a registered collection.
    pub fn get(&self, name: &str) -> Option<SharedCollection> {
        self.collections.get(name).map(|entry| entry.value().clone())
    }

    /// Names of the registered collections, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Flushes and closes every registered collection, then forgets them.
    pub fn close_all(&self) {
        let collections: Vec<SharedCollection> = self
            .collections
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        self.collections.clear();

        for collection in collections {
            collection.lock().close();
        }
    }
}
