//! Collection factory functions for benchmarks

use crate::config::StoreType;
use jsondb::collection::{skip_save, Document, JsonCollection};
use jsondb::errors::JsonDbResult;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Counter for unique collection paths within a run
static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The test-data directory at the workspace root
fn get_test_data_dir() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let manifest_dir = PathBuf::from(manifest_dir);
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
        .join("test-data")
}

/// Create a unique collection file path within the test-data directory
fn create_unique_path() -> PathBuf {
    let test_data_dir = get_test_data_dir();
    if let Err(e) = std::fs::create_dir_all(&test_data_dir) {
        log::warn!("Failed to create {}: {}", test_data_dir.display(), e);
    }

    let counter = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    test_data_dir.join(format!("bench_{}_{}.json", counter, Uuid::new_v4()))
}

/// A collection and its backing file, removed on drop
pub struct BenchContext {
    collection: JsonCollection,
    path: Option<PathBuf>,
}

impl BenchContext {
    pub fn collection(&self) -> &JsonCollection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut JsonCollection {
        &mut self.collection
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Drop for BenchContext {
    fn drop(&mut self) {
        // Let pending saves land before removing the file
        self.collection.close();

        if let Some(ref path) = self.path {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Remove every file left in the test-data directory
pub fn cleanup_all_bench_data() {
    let test_data_dir = get_test_data_dir();
    if let Ok(entries) = std::fs::read_dir(&test_data_dir) {
        for entry in entries.flatten() {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}

/// Create a collection of the given type
pub fn create_collection(store_type: StoreType) -> JsonDbResult<BenchContext> {
    match store_type {
        StoreType::InMemory => Ok(BenchContext {
            collection: JsonCollection::in_memory(),
            path: None,
        }),
        StoreType::File => {
            let path = create_unique_path();
            let collection = JsonCollection::open(&path)?;
            Ok(BenchContext {
                collection,
                path: Some(path),
            })
        }
    }
}

/// Create a collection holding `docs`, saved once when file backed
pub fn create_populated_collection(store_type: StoreType, docs: &[Document]) -> JsonDbResult<BenchContext> {
    let mut ctx = create_collection(store_type)?;
    for doc in docs {
        ctx.collection_mut().insert(doc.clone(), skip_save()).into_result()?;
    }
    if ctx.path().is_some() {
        ctx.collection().close();
    }
    Ok(ctx)
}
