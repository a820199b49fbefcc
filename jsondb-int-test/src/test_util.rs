use jsondb::collection::{Document, InsertOptions, JsonCollection};
use jsondb::doc;
use jsondb::errors::JsonDbResult;
use jsondb::registry::{Registry, SharedCollection};
use std::backtrace::Backtrace;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use std::{env, fs, thread};

/// Runs a test between a setup and a teardown step.
///
/// The teardown runs even when the test body fails. A failing or panicking
/// test is retried a couple of times before the failure is reported, so a
/// busy filesystem does not fail the suite on its own.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> JsonDbResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> JsonDbResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> JsonDbResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    const MAX_RETRIES: u32 = 3;
    let mut last_error = String::new();

    for attempt in 1..=MAX_RETRIES {
        let start_time = Instant::now();

        let result = std::panic::catch_unwind(|| {
            let ctx = before().map_err(|e| format!("Before run failed: {:?}", e))?;
            let test_result = test(ctx.clone());
            let after_result = after(ctx);
            test_result.map_err(|e| format!("Test failed: {:?}", e))?;
            after_result.map_err(|e| format!("After run failed: {:?}", e))
        });

        let error = match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e,
            Err(panic_err) => {
                let message = if let Some(s) = panic_err.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_err.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                format!("Panic: {}\n{}", message, Backtrace::capture())
            }
        };

        eprintln!(
            "========== Test Attempt {}/{} Failed (took {:?}) ==========\n{}",
            attempt,
            MAX_RETRIES,
            start_time.elapsed(),
            error
        );
        last_error = error;
        if attempt < MAX_RETRIES {
            thread::sleep(Duration::from_millis(100 * attempt as u64));
        }
    }

    panic!(
        "Test failed after {} attempts. Last error: {}",
        MAX_RETRIES, last_error
    );
}

/// A collection under test with the registry that owns it.
#[derive(Clone)]
pub struct TestContext {
    path: Option<PathBuf>,
    registry: Arc<Registry>,
    collection: SharedCollection,
}

impl TestContext {
    pub fn new(path: Option<PathBuf>, registry: Arc<Registry>, collection: SharedCollection) -> Self {
        Self {
            path,
            registry,
            collection,
        }
    }

    /// Backing file, `None` for an in-memory context.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn collection(&self) -> SharedCollection {
        self.collection.clone()
    }
}

/// A fresh file path in the system temp directory.
pub fn random_path() -> PathBuf {
    let id = uuid::Uuid::new_v4();
    env::temp_dir().join(format!("jsondb-{}.json", id))
}

/// A context around a file-backed collection at a random path.
pub fn create_test_context() -> JsonDbResult<TestContext> {
    let path = random_path();
    let registry = Arc::new(Registry::new());
    let collection = registry.collection(&path, Some("test"))?;
    Ok(TestContext::new(Some(path), registry, collection))
}

/// A context around an in-memory collection.
pub fn create_memory_context() -> JsonDbResult<TestContext> {
    let registry = Arc::new(Registry::new());
    let collection = registry.memory();
    Ok(TestContext::new(None, registry, collection))
}

/// Closes every collection of the context and removes its file.
pub fn cleanup(ctx: TestContext) -> JsonDbResult<()> {
    ctx.registry().close_all();

    if let Some(path) = ctx.path() {
        remove_file(path);
        let mut temp = path.as_os_str().to_os_string();
        temp.push(".tmp");
        remove_file(Path::new(&temp));
    }
    Ok(())
}

fn remove_file(path: &Path) {
    const MAX_RETRIES: u64 = 5;

    for retry in 0..MAX_RETRIES {
        match fs::remove_file(path) {
            Ok(_) => return,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) if retry + 1 < MAX_RETRIES => {
                log::debug!("Retrying removal of {}: {}", path.display(), e);
                thread::sleep(Duration::from_millis(50 * (retry + 1)));
            }
            Err(e) => {
                eprintln!("Warning: Failed to remove {}: {:?}", path.display(), e);
            }
        }
    }
}

pub fn create_test_docs() -> Vec<Document> {
    let doc1 = doc! {
        _id: "p1",
        first_name: "fn1",
        last_name: "ln1",
        age: 32,
        tags: ["admin", "dev"],
        address: { city: "Sofia", zip: 1000 },
        body: "a quick brown fox jump over the lazy dog",
    };

    let doc2 = doc! {
        _id: "p2",
        first_name: "fn2",
        last_name: "ln2",
        age: 45,
        tags: ["dev"],
        address: { city: "Plovdiv", zip: 4000 },
        body: "quick hello world from jsondb",
    };

    let doc3 = doc! {
        _id: "p3",
        first_name: "fn3",
        last_name: "ln2",
        age: 27,
        tags: [],
        body: "Lorem ipsum dolor sit amet, consectetur \
        adipiscing elit. Sed nunc mi, mattis ullamcorper \
        dignissim vitae, condimentum non lorem.",
    };

    vec![doc1, doc2, doc3]
}

/// Inserts [create_test_docs] without saving.
pub fn insert_test_documents(collection: &mut JsonCollection) -> JsonDbResult<()> {
    for doc in create_test_docs() {
        collection
            .insert(doc, InsertOptions::new(true))
            .into_result()?;
    }
    Ok(())
}

/// Polls until `path` exists.
pub fn await_file(path: &Path) {
    awaitility::at_most(Duration::from_secs(5)).until(|| path.exists());
}
