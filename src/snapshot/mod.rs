//! Snapshots: durable copies of the whole book collection.
//!
//! A snapshot is the full collection serialized as a JSON array of book
//! objects, ordered by id. The store writes one after every mutation and
//! reads one once at startup.
//!
//! ## Example
//!
//! ```ignore
//! use bookvault::{JsonFileSnapshot, SnapshotStore};
//!
//! let snapshot = JsonFileSnapshot::new("data/books.json");
//! snapshot.save(&books)?;
//! let restored = snapshot.load()?; // Some(books)
//! ```

mod in_memory;
mod json_file;

use std::error::Error;
use std::fmt;
use std::io;

use crate::book::Book;

pub use in_memory::InMemorySnapshot;
pub use json_file::JsonFileSnapshot;

/// Durable storage for collection snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Read the stored snapshot. Returns `None` if nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Book>>, SnapshotError>;

    /// Replace the stored snapshot with `books`.
    fn save(&self, books: &[Book]) -> Result<(), SnapshotError>;
}

/// Error type for snapshot reads and writes.
#[derive(Debug)]
pub enum SnapshotError {
    /// Reading or writing the backing storage failed.
    Io(io::Error),
    /// Stored content is not a valid list of books.
    Malformed(serde_json::Error),
    /// A lock guarding in-process storage was poisoned.
    LockPoisoned(&'static str),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "snapshot io error: {}", e),
            SnapshotError::Malformed(e) => write!(f, "malformed snapshot: {}", e),
            SnapshotError::LockPoisoned(operation) => {
                write!(f, "snapshot lock poisoned during {}", operation)
            }
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SnapshotError::Io(e) => Some(e),
            SnapshotError::Malformed(e) => Some(e),
            SnapshotError::LockPoisoned(_) => None,
        }
    }
}

impl From<io::Error> for SnapshotError {
    fn from(err: io::Error) -> Self {
        SnapshotError::Io(err)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Malformed(err)
    }
}

/// Serialize books as a pretty-printed JSON array.
pub(crate) fn encode(books: &[Book]) -> Result<Vec<u8>, SnapshotError> {
    Ok(serde_json::to_vec_pretty(books)?)
}

/// Parse a JSON array of books. Every field of every book is required.
pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<Book>, SnapshotError> {
    Ok(serde_json::from_slice(bytes)?)
}
