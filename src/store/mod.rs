//! BookStore - the single owner of the book collection.
//!
//! The collection lives behind one `RwLock`. Readers share it; writers take
//! a `BooksWriter`, which holds the write lock across the whole
//! check-mutate-persist sequence so duplicate checks and id assignment are
//! never observed stale.
//!
//! Every mutation is followed by a snapshot write. A failed write is logged
//! and otherwise ignored: the in-memory collection stays authoritative.
//!
//! ## Example
//!
//! ```ignore
//! use bookvault::{BookStore, InMemorySnapshot};
//!
//! let store = BookStore::open(InMemorySnapshot::new());
//! let mut books = store.write()?;
//! let id = books.next_id()?;
//! if !books.exists("Dune", "Frank Herbert", None) {
//!     books.add(new_book.into_book(id))?;
//! }
//! ```

mod books;
mod error;

use std::ops::Deref;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error, info, warn};

use crate::book::Book;
use crate::snapshot::SnapshotStore;

pub use books::{Books, DEFAULT_GENRE, DEFAULT_PRICE};
pub use error::StoreError;

/// Book collection backed by a snapshot store.
pub struct BookStore<S> {
    books: RwLock<Books>,
    snapshot: S,
}

impl<S: SnapshotStore> BookStore<S> {
    /// Open a store, loading the collection from `snapshot`.
    ///
    /// A missing or unreadable snapshot falls back to the default seed
    /// records. Opening never fails.
    pub fn open(snapshot: S) -> Self {
        let books = load_books(&snapshot);
        Self {
            books: RwLock::new(books),
            snapshot,
        }
    }

    /// Replace the in-memory collection with what the snapshot holds, with
    /// the same fallback rules as `open`. Returns the number of books loaded.
    pub fn load_snapshot(&self) -> Result<usize, StoreError> {
        let loaded = load_books(&self.snapshot);
        let count = loaded.len();
        *self.write_lock()? = loaded;
        Ok(count)
    }

    /// Write the current collection to the snapshot. Returns whether the
    /// write succeeded; failures are logged, not propagated.
    pub fn persist(&self) -> Result<bool, StoreError> {
        let books = self.read()?;
        Ok(persist_books(&self.snapshot, &books))
    }

    /// Shared read access to the collection.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Books>, StoreError> {
        self.books
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))
    }

    /// Exclusive access for a read-modify-persist sequence.
    pub fn write(&self) -> Result<BooksWriter<'_, S>, StoreError> {
        Ok(BooksWriter {
            books: self.write_lock()?,
            snapshot: &self.snapshot,
        })
    }

    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn next_id(&self) -> Result<u64, StoreError> {
        self.read()?.next_id()
    }

    pub fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.read()?.all())
    }

    pub fn get_by_id(&self, id: u64) -> Result<Option<Book>, StoreError> {
        Ok(self.read()?.get(id).cloned())
    }

    pub fn exists(
        &self,
        title: &str,
        author: &str,
        exclude_id: Option<u64>,
    ) -> Result<bool, StoreError> {
        Ok(self.read()?.exists(title, author, exclude_id))
    }

    pub fn add(&self, book: Book) -> Result<Book, StoreError> {
        self.write()?.add(book)
    }

    pub fn update(&self, id: u64, book: Book) -> Result<Book, StoreError> {
        self.write()?.update(id, book)
    }

    pub fn delete(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.write()?.delete(id))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, Books>, StoreError> {
        self.books
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))
    }
}

/// Write access to the collection. Holds the store's write lock until dropped.
pub struct BooksWriter<'a, S> {
    books: RwLockWriteGuard<'a, Books>,
    snapshot: &'a S,
}

impl<S> Deref for BooksWriter<'_, S> {
    type Target = Books;

    fn deref(&self) -> &Books {
        &self.books
    }
}

impl<S: SnapshotStore> BooksWriter<'_, S> {
    /// Insert `book` under its own id and persist. The id should come from
    /// `next_id` on this writer; an id that is already taken is refused.
    pub fn add(&mut self, book: Book) -> Result<Book, StoreError> {
        if self.books.contains(book.id) {
            return Err(StoreError::DuplicateId(book.id));
        }
        debug!(id = book.id, title = %book.title, "adding book");
        self.books.insert(book.clone());
        self.persist();
        Ok(book)
    }

    /// Replace the book at `id` and persist. The stored record keeps `id`
    /// whatever `book.id` says.
    pub fn update(&mut self, id: u64, mut book: Book) -> Result<Book, StoreError> {
        if !self.books.contains(id) {
            return Err(StoreError::UnknownId(id));
        }
        debug!(id, "updating book");
        book.id = id;
        self.books.insert(book.clone());
        self.persist();
        Ok(book)
    }

    /// Remove the book at `id`. Persists and returns true only if something
    /// was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        if self.books.remove(id).is_none() {
            return false;
        }
        debug!(id, "deleted book");
        self.persist();
        true
    }

    fn persist(&self) -> bool {
        persist_books(self.snapshot, &self.books)
    }
}

fn load_books<S: SnapshotStore>(snapshot: &S) -> Books {
    match snapshot.load() {
        Ok(Some(records)) if records.iter().any(|b| b.id == 0) => {
            warn!("snapshot holds a book with id 0, using default books");
            Books::defaults()
        }
        Ok(Some(records)) => {
            let books = Books::from_records(records);
            info!(count = books.len(), "loaded books from snapshot");
            books
        }
        Ok(None) => {
            info!("no snapshot found, using default books");
            Books::defaults()
        }
        Err(e) => {
            warn!(error = %e, "failed to load snapshot, using default books");
            Books::defaults()
        }
    }
}

fn persist_books<S: SnapshotStore>(snapshot: &S, books: &Books) -> bool {
    match snapshot.save(&books.all()) {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, count = books.len(), "failed to persist snapshot");
            false
        }
    }
}
