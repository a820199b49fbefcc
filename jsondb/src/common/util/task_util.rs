use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};

/// Runs `op` on a new named thread.
///
/// Background writes get their own thread for the duration of a busy period so
/// a slow filesystem stalls only the path being written.
pub fn async_task<OP>(name: &str, op: OP) -> JsonDbResult<()>
where
    OP: FnOnce() + Send + 'static,
{
    std::thread::Builder::new()
        .name(name.to_string())
        .spawn(op)
        .map(|_| ())
        .map_err(|err| {
            log::error!("Failed to spawn task {}: {}", name, err);
            JsonDbError::new(
                &format!("Failed to spawn task {}: {}", name, err),
                ErrorKind::InternalError,
            )
        })
}
