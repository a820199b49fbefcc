use crate::common::{DEFAULT_ID_LENGTH, MAX_ID_ATTEMPTS};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generates random document identifiers.
///
/// Ids are fixed-length strings over the case-sensitive alphanumeric alphabet
/// (62 symbols). At the default length of 16 the id space holds about 4.7e28
/// values, so a collision is not expected in practice; the generator still
/// checks every candidate against the collection and draws again on a hit.
///
/// The retry loop is bounded by [MAX_ID_ATTEMPTS]. Running out of attempts
/// means the id space is exhausted or the random source is broken, and is
/// reported as an [ErrorKind::InternalError].
#[derive(Debug, Clone, Copy)]
pub struct IdGenerator {
    length: usize,
    max_attempts: usize,
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator::new(DEFAULT_ID_LENGTH)
    }
}

impl IdGenerator {
    pub fn new(length: usize) -> Self {
        IdGenerator {
            length,
            max_attempts: MAX_ID_ATTEMPTS,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Draws one random id. Uniqueness is not checked.
    pub fn random_id(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }

    /// Draws ids until `exists` reports one as free.
    pub fn unique_id<F>(&self, exists: F) -> JsonDbResult<String>
    where
        F: Fn(&str) -> bool,
    {
        self.unique_id_from(exists, || self.random_id())
    }

    pub(crate) fn unique_id_from<F, S>(&self, exists: F, mut source: S) -> JsonDbResult<String>
    where
        F: Fn(&str) -> bool,
        S: FnMut() -> String,
    {
        for attempt in 0..self.max_attempts {
            let id = source();
            if !exists(&id) {
                return Ok(id);
            }
            log::debug!("Generated id {} collides with an existing one (attempt {})", id, attempt + 1);
        }

        log::error!("Failed to generate a unique id after {} attempts", self.max_attempts);
        Err(JsonDbError::new(
            &format!("Failed to generate a unique id after {} attempts", self.max_attempts),
            ErrorKind::InternalError,
        ))
    }

    #[cfg(test)]
    fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}
