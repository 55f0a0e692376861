//! Books - the in-memory collection owned by `BookStore`.

use std::collections::BTreeMap;

use super::StoreError;
use crate::book::Book;

pub const DEFAULT_PRICE: f64 = 0.0;
pub const DEFAULT_GENRE: &str = "unknown";

/// The book collection, keyed and ordered by id.
///
/// Reads are public. Mutation is reserved for `BooksWriter`, which pairs
/// every change with a snapshot write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Books {
    records: BTreeMap<u64, Book>,
}

impl Books {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from records. A later record replaces an earlier
    /// one with the same id.
    pub fn from_records(records: impl IntoIterator<Item = Book>) -> Self {
        Self {
            records: records.into_iter().map(|b| (b.id, b)).collect(),
        }
    }

    /// The three seed records used when no usable snapshot exists.
    pub fn defaults() -> Self {
        let seed = |id: u64, title: &str, author: &str| Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            price: DEFAULT_PRICE,
            genre: DEFAULT_GENRE.to_string(),
        };
        Self::from_records([
            seed(1, "1984", "George Orwell"),
            seed(2, "To Kill a Mockingbird", "Harper Lee"),
            seed(3, "The Great Gatsby", "F. Scott Fitzgerald"),
        ])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `max(id) + 1`, or 1 for an empty collection. Fails rather than hand
    /// out an id that is already taken.
    pub fn next_id(&self) -> Result<u64, StoreError> {
        match self.records.keys().next_back() {
            Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted),
            None => Ok(1),
        }
    }

    pub fn get(&self, id: u64) -> Option<&Book> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.records.contains_key(&id)
    }

    /// Books in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.records.values()
    }

    /// Owned copy of every book, in id order.
    pub fn all(&self) -> Vec<Book> {
        self.records.values().cloned().collect()
    }

    /// True if some book other than `exclude_id` has the same title and
    /// author, ignoring case and surrounding whitespace.
    pub fn exists(&self, title: &str, author: &str, exclude_id: Option<u64>) -> bool {
        self.records
            .values()
            .filter(|b| Some(b.id) != exclude_id)
            .any(|b| b.same_work(title, author))
    }

    pub(crate) fn insert(&mut self, book: Book) {
        self.records.insert(book.id, book);
    }

    pub(crate) fn remove(&mut self, id: u64) -> Option<Book> {
        self.records.remove(&id)
    }
}
