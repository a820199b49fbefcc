use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for jsondb operations.
///
/// Every failure the store can report falls into one of these categories. Most of
/// them are recoverable: the collection facade reports them next to a neutral
/// result instead of aborting the caller.
///
/// # Examples
///
/// ```rust
/// use jsondb::errors::{ErrorKind, JsonDbError, JsonDbResult};
///
/// fn example() -> JsonDbResult<()> {
///     Err(JsonDbError::new("_id is not unique: foo", ErrorKind::UniqueConstraintViolation))
/// }
/// assert!(example().is_err());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Shape errors
    /// Malformed query, bad operator operand or unknown query operator
    QueryError,
    /// Malformed update directive, rejected field or unknown update operator
    UpdateError,
    /// Malformed or mixed projection
    ProjectionError,
    /// Generic validation error (e.g. a candidate that is not an object)
    ValidationError,

    // Identity errors
    /// The provided `_id` is invalid
    InvalidId,
    /// The provided `_id` already exists in the collection
    UniqueConstraintViolation,

    // Policy rejections
    /// A remove or update matched several documents without the `multi` flag
    MultiMatchRejected,

    // IO and storage errors
    /// Generic IO error
    IOError,
    /// The file was not found
    FileNotFound,
    /// Permission denied for file operation
    PermissionDenied,
    /// File content cannot be decoded into a collection
    FileCorrupted,
    /// Error encoding or decoding data
    EncodingError,

    // Generic errors
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::QueryError => write!(f, "Query error"),
            ErrorKind::UpdateError => write!(f, "Update error"),
            ErrorKind::ProjectionError => write!(f, "Projection error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::UniqueConstraintViolation => write!(f, "Unique constraint violation"),
            ErrorKind::MultiMatchRejected => write!(f, "Multi match rejected"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::FileCorrupted => write!(f, "File corrupted"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom jsondb error type.
///
/// `JsonDbError` carries a message, a kind and an optional cause. A backtrace is
/// captured at construction and printed by the `Debug` implementation.
///
/// # Examples
///
/// ```rust
/// use jsondb::errors::{ErrorKind, JsonDbError};
///
/// let cause = JsonDbError::new("disk full", ErrorKind::IOError);
/// let err = JsonDbError::new_with_cause("save failed", ErrorKind::IOError, cause);
/// assert_eq!(err.kind(), &ErrorKind::IOError);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct JsonDbError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<JsonDbError>>,
    backtrace: Atomic<Backtrace>,
}

impl JsonDbError {
    /// Creates a new `JsonDbError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        JsonDbError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new_unresolved()),
        }
    }

    /// Creates a new `JsonDbError` wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: JsonDbError) -> Self {
        JsonDbError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new_unresolved()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&JsonDbError> {
        self.cause.as_deref()
    }
}

impl Display for JsonDbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for JsonDbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => {
                let mut backtrace = self.backtrace.write();
                backtrace.resolve();
                write!(f, "{}\n{:?}", self.message, backtrace)
            }
        }
    }
}

impl Error for JsonDbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for jsondb operations.
pub type JsonDbResult<T> = Result<T, JsonDbError>;

impl From<std::io::Error> for JsonDbError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        JsonDbError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<serde_json::Error> for JsonDbError {
    fn from(err: serde_json::Error) -> Self {
        let error_kind = if err.is_io() {
            ErrorKind::IOError
        } else if err.is_data() || err.is_syntax() || err.is_eof() {
            ErrorKind::FileCorrupted
        } else {
            ErrorKind::EncodingError
        };
        JsonDbError::new(&format!("JSON error: {}", err), error_kind)
    }
}

impl From<std::string::FromUtf8Error> for JsonDbError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        JsonDbError::new(
            &format!("UTF-8 encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}
