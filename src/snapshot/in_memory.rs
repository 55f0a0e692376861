//! InMemorySnapshot - process-local snapshot storage for testing and development.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::{decode, encode, SnapshotError, SnapshotStore};
use crate::book::Book;

/// Snapshot held as serialized bytes in memory.
///
/// Clone-friendly via Arc: clones share the same bytes, so a test can keep
/// a handle while the store owns another.
#[derive(Clone, Default)]
pub struct InMemorySnapshot {
    bytes: Arc<RwLock<Option<Vec<u8>>>>,
    saves: Arc<AtomicU64>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemorySnapshot {
    /// Create an empty snapshot (nothing stored yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot pre-populated with raw bytes, which need not be valid.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let snapshot = Self::new();
        if let Ok(mut slot) = snapshot.bytes.write() {
            *slot = Some(bytes.into());
        }
        snapshot
    }

    /// Create a snapshot pre-populated with `books`.
    pub fn with_books(books: &[Book]) -> Result<Self, SnapshotError> {
        Ok(Self::with_bytes(encode(books)?))
    }

    /// The currently stored bytes, if any.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.bytes.read().ok().and_then(|slot| slot.clone())
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make subsequent saves fail with an io error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SnapshotStore for InMemorySnapshot {
    fn load(&self) -> Result<Option<Vec<Book>>, SnapshotError> {
        let slot = self
            .bytes
            .read()
            .map_err(|_| SnapshotError::LockPoisoned("read"))?;
        match slot.as_deref() {
            Some(bytes) => decode(bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, books: &[Book]) -> Result<(), SnapshotError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SnapshotError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "snapshot writes disabled",
            )));
        }

        let bytes = encode(books)?;
        let mut slot = self
            .bytes
            .write()
            .map_err(|_| SnapshotError::LockPoisoned("write"))?;
        *slot = Some(bytes);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
