//! Persistence layer abstractions and the file-backed implementation.
//!
//! # Responsibility
//! - Define the durable storage contract for note records and settings.
//! - Isolate filesystem layout details from service orchestration.
//!
//! # Invariants
//! - The embedded `id` is authoritative; the filename is a browsing aid.
//! - At most one physical artifact exists per `id` after any successful
//!   write.
//! - Load never fails on a corrupt record; the record is skipped and
//!   logged, not repaired and not deleted.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod note_store;

pub use note_store::{sanitize_title, FsNoteStore, NoteStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure for note store operations.
///
/// Every variant is retryable: the in-memory record stays authoritative
/// until the next successful write.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store I/O failure at `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "record serialization failure: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
