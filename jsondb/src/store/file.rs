use std::fs;
use std::path::Path;

use crate::collection::DocumentMap;
use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};

/// Loads the collection persisted at `path`.
///
/// A missing file or one with blank content is an empty collection. Anything
/// else must decode to an object mapping ids to document objects, otherwise
/// loading fails with [ErrorKind::FileCorrupted].
pub fn load_documents(path: &Path) -> JsonDbResult<DocumentMap> {
    match fs::read(path) {
        Ok(bytes) => {
            let documents = decode_documents(&bytes).map_err(|err| {
                log::error!("Failed to load {}: {}", path.display(), err);
                err
            })?;
            log::info!("Loaded {} documents from {}", documents.len(), path.display());
            Ok(documents)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::info!("{} does not exist yet, starting empty", path.display());
            Ok(DocumentMap::new())
        }
        Err(err) => {
            log::error!("Failed to read {}: {}", path.display(), err);
            Err(err.into())
        }
    }
}

/// Decodes persisted file content.
///
/// The map key is the authoritative id: an entry whose `_id` is missing or
/// differs from its key gets the key stamped as `_id`.
pub fn decode_documents(bytes: &[u8]) -> JsonDbResult<DocumentMap> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(DocumentMap::new());
    }

    let entries = match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(entries) => entries,
        other => {
            return Err(corrupted(format!(
                "Persisted collection must be an object. Found: {}",
                other.kind_name()
            )))
        }
    };

    let mut documents = DocumentMap::new();
    for (id, entry) in entries {
        let mut document = match entry {
            Value::Object(document) => document,
            other => {
                return Err(corrupted(format!(
                    "Persisted entry {} must be an object. Found: {}",
                    id,
                    other.kind_name()
                )))
            }
        };
        if id.is_empty() {
            return Err(corrupted("Persisted entry has an empty id".to_string()));
        }
        if document.id() != Some(id.as_str()) {
            log::warn!("Persisted entry {} has a mismatched _id, using its key", id);
            document.put(DOC_ID, id.as_str());
        }
        documents.insert(id, document);
    }
    Ok(documents)
}

fn corrupted(message: String) -> JsonDbError {
    JsonDbError::new(&message, ErrorKind::FileCorrupted)
}
