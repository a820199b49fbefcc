use jsondb::collection::{skip_save, JsonCollection};
use jsondb::doc;
use jsondb::errors::JsonDbResult;
use jsondb::store::{load_documents, DiskSink, FileSink, FileWriter, SaveOutcome};
use jsondb_int_test::test_util::random_path;
use parking_lot::Mutex;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Writes to disk once the test releases the gate.
#[derive(Default)]
struct GatedDiskSink {
    gate: Mutex<()>,
    writes: AtomicUsize,
}

impl FileSink for GatedDiskSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> JsonDbResult<()> {
        let _open = self.gate.lock();
        self.writes.fetch_add(1, Ordering::SeqCst);
        DiskSink.write(path, bytes)
    }
}

type Results = Arc<Mutex<Vec<Option<SaveOutcome>>>>;

fn recorder(results: &Results, index: usize) -> impl FnOnce(JsonDbResult<SaveOutcome>) + Send + 'static {
    let results = results.clone();
    move |result| {
        results.lock()[index] = result.ok();
    }
}

#[test]
fn test_burst_of_saves_is_coalesced() {
    let path = random_path();
    let sink = Arc::new(GatedDiskSink::default());
    let writer = FileWriter::new(sink.clone());
    let mut collection = JsonCollection::builder()
        .file_path(&path)
        .writer(writer.clone())
        .open()
        .unwrap();

    let results: Results = Arc::new(Mutex::new(vec![None; 100]));
    {
        let _closed = sink.gate.lock();
        for i in 0..100 {
            collection.insert(doc! { seq: i }, skip_save());
            collection.save_with(recorder(&results, i));
        }
    }
    writer.wait_idle(&path);

    assert!(!writer.is_busy(&path));
    assert_eq!(sink.writes.load(Ordering::SeqCst), 2);

    let results = results.lock();
    assert_eq!(results[0], Some(SaveOutcome::Written));
    assert_eq!(results[99], Some(SaveOutcome::Written));
    for (i, result) in results.iter().enumerate().take(99).skip(1) {
        assert_eq!(*result, Some(SaveOutcome::Superseded), "request {}", i);
    }

    let on_disk = load_documents(&path).unwrap();
    assert_eq!(on_disk.len(), 100);
    assert_eq!(on_disk, collection.snapshot());

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_unthrottled_saves_end_with_last_snapshot() {
    let path = random_path();
    let writer = FileWriter::default();
    let mut collection = JsonCollection::builder()
        .file_path(&path)
        .writer(writer.clone())
        .open()
        .unwrap();

    let results: Results = Arc::new(Mutex::new(vec![None; 100]));
    for i in 0..100 {
        collection.insert(doc! { seq: i }, skip_save());
        collection.save_with(recorder(&results, i));
    }

    awaitility::at_most(Duration::from_secs(10))
        .until(|| results.lock().iter().all(|r| r.is_some()));
    writer.wait_idle(&path);

    let results = results.lock();
    assert_eq!(results[0], Some(SaveOutcome::Written));
    assert_eq!(results[99], Some(SaveOutcome::Written));
    assert_eq!(load_documents(&path).unwrap(), collection.snapshot());

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_paths_do_not_block_each_other() {
    let blocked_path = random_path();
    let free_path = random_path();
    let sink = Arc::new(GatedDiskSink::default());
    let gated = FileWriter::new(sink.clone());
    let writer = FileWriter::default();

    let closed = sink.gate.lock();
    gated.write(&blocked_path, &doc! { a: { _id: "a" } }, |_| {});

    let written = Arc::new(Mutex::new(None));
    let captured = written.clone();
    writer.write(&free_path, &doc! { b: { _id: "b" } }, move |r| {
        *captured.lock() = r.ok();
    });
    assert!(writer.wait_idle_timeout(&free_path, Duration::from_secs(5)));
    assert_eq!(*written.lock(), Some(SaveOutcome::Written));
    assert!(gated.is_busy(&blocked_path));

    drop(closed);
    gated.wait_idle(&blocked_path);
    assert_eq!(load_documents(&blocked_path).unwrap().len(), 1);

    fs::remove_file(&blocked_path).unwrap();
    fs::remove_file(&free_path).unwrap();
}
