use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use serde::Serialize;

use crate::common::async_task;
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};

use super::{DiskSink, FileSink};

/// How a save request ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The requested snapshot is on disk.
    Written,
    /// A newer request for the same path replaced this one before it ran.
    Superseded,
}

impl Display for SaveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveOutcome::Written => write!(f, "written"),
            SaveOutcome::Superseded => write!(f, "superseded"),
        }
    }
}

/// Completion callback of a save request. It runs exactly once, either on the
/// requesting thread (encoding failure, supersession) or on the writer thread
/// of the path.
pub type SaveCallback = Box<dyn FnOnce(JsonDbResult<SaveOutcome>) + Send + 'static>;

struct Job {
    bytes: Vec<u8>,
    callback: SaveCallback,
}

/// State of a busy path. Idle paths have no entry.
struct Busy {
    pending: Option<Job>,
}

struct FileWriterInner {
    sink: Arc<dyn FileSink>,
    paths: Mutex<HashMap<PathBuf, Busy>>,
    idle: Condvar,
}

/// Coalescing snapshot writer.
///
/// Each path moves through `Idle -> Writing -> Writing with pending -> ...`:
///
/// - a request for an idle path starts a write on a background thread;
/// - a request for a busy path becomes the pending job, and the job it
///   replaces (if any) completes with [SaveOutcome::Superseded];
/// - when a write completes, its callback fires, then the pending job (if
///   any) is written by the same thread; otherwise the path becomes idle.
///
/// So only one write is in flight per path, a burst of requests costs at most
/// two writes, and the last requested snapshot is the one left on disk.
/// Paths are independent of each other. Failed writes are reported to their
/// callback only and are never retried.
///
/// `FileWriter` is cheap to clone; clones share the same per-path state.
#[derive(Clone)]
pub struct FileWriter {
    inner: Arc<FileWriterInner>,
}

impl Default for FileWriter {
    fn default() -> Self {
        FileWriter::new(Arc::new(DiskSink))
    }
}

impl FileWriter {
    pub fn new(sink: Arc<dyn FileSink>) -> Self {
        FileWriter {
            inner: Arc::new(FileWriterInner {
                sink,
                paths: Mutex::new(HashMap::new()),
                idle: Condvar::new(),
            }),
        }
    }

    /// Requests that `snapshot` be written to `path`.
    ///
    /// The snapshot is encoded before this call returns; an encoding failure
    /// completes `callback` with [ErrorKind::EncodingError] and leaves the
    /// path state untouched.
    pub fn write<T, F>(&self, path: &Path, snapshot: &T, callback: F)
    where
        T: Serialize + ?Sized,
        F: FnOnce(JsonDbResult<SaveOutcome>) + Send + 'static,
    {
        let bytes = match serde_json::to_vec(snapshot) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("Failed to encode snapshot for {}: {}", path.display(), err);
                callback(Err(JsonDbError::new(
                    &format!("Failed to encode snapshot for {}: {}", path.display(), err),
                    ErrorKind::EncodingError,
                )));
                return;
            }
        };

        self.submit(
            path,
            Job {
                bytes,
                callback: Box::new(callback),
            },
        );
    }

    fn submit(&self, path: &Path, job: Job) {
        let mut paths = self.inner.paths.lock();
        let superseded = match paths.get_mut(path) {
            Some(busy) => busy.pending.replace(job),
            None => {
                paths.insert(path.to_path_buf(), Busy { pending: None });
                drop(paths);
                self.start(path.to_path_buf(), job);
                return;
            }
        };
        drop(paths);

        if let Some(job) = superseded {
            log::debug!("Save request for {} superseded by a newer one", path.display());
            (job.callback)(Ok(SaveOutcome::Superseded));
        }
    }

    fn start(&self, path: PathBuf, job: Job) {
        let writer = self.clone();
        let worker_path = path.clone();
        let job = Arc::new(Mutex::new(Some(job)));
        let worker_job = job.clone();

        let spawned = async_task("jsondb-writer", move || {
            if let Some(job) = worker_job.lock().take() {
                writer.run(worker_path, job);
            }
        });

        if let Err(err) = spawned {
            // the worker never ran; fail this job and whatever queued behind it
            let pending = {
                let mut paths = self.inner.paths.lock();
                let pending = paths.remove(&path).and_then(|busy| busy.pending);
                self.inner.idle.notify_all();
                pending
            };
            for job in job.lock().take().into_iter().chain(pending) {
                (job.callback)(Err(err.clone()));
            }
        }
    }

    fn run(&self, path: PathBuf, first: Job) {
        let mut job = first;
        loop {
            let result = self.inner.sink.write(&path, &job.bytes);
            match &result {
                Ok(()) => log::debug!("Saved {} bytes to {}", job.bytes.len(), path.display()),
                Err(err) => log::error!("Failed to save {}: {}", path.display(), err),
            }
            (job.callback)(result.map(|_| SaveOutcome::Written));

            let next = {
                let mut paths = self.inner.paths.lock();
                let next = paths.get_mut(&path).and_then(|busy| busy.pending.take());
                if next.is_none() {
                    paths.remove(&path);
                    self.inner.idle.notify_all();
                }
                next
            };

            match next {
                Some(pending) => job = pending,
                None => break,
            }
        }
    }

    /// Whether a write for `path` is in flight.
    pub fn is_busy(&self, path: &Path) -> bool {
        self.inner.paths.lock().contains_key(path)
    }

    /// Blocks until `path` is idle.
    pub fn wait_idle(&self, path: &Path) {
        let mut paths = self.inner.paths.lock();
        while paths.contains_key(path) {
            self.inner.idle.wait(&mut paths);
        }
    }

    /// Blocks until `path` is idle or `timeout` elapses. Returns whether the
    /// path is idle.
    pub fn wait_idle_timeout(&self, path: &Path, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut paths = self.inner.paths.lock();
        while paths.contains_key(path) {
            if self.inner.idle.wait_until(&mut paths, deadline).timed_out() {
                return !paths.contains_key(path);
            }
        }
        true
    }
}
