//! Book service - one handler per catalogue operation.
//!
//! `BookService<S>` owns a `BookStore<S>` and turns each request into either
//! a success value or a `HandlerError`. It knows nothing about HTTP; a
//! transport maps `HandlerError::status_code()` onto its own responses.
//!
//! ## Example
//!
//! ```ignore
//! use bookvault::{BookService, BookStore, InMemorySnapshot, NewBook};
//!
//! let service = BookService::new(BookStore::open(InMemorySnapshot::new()));
//! let book = service.create(NewBook { .. })?;
//! service.delete(book.id as i64)?;
//! ```

mod error;

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::IteratorRandom;
use tracing::info;

use crate::book::{Book, BookPatch, NewBook, Stats, Summary};
use crate::snapshot::SnapshotStore;
use crate::store::BookStore;
use crate::validation::{validate_new, validate_patch};

pub use error::HandlerError;

const WELCOME: &str = "Welcome to the BookVault API!";

/// Request handlers over a book store.
pub struct BookService<S> {
    store: BookStore<S>,
}

impl<S: SnapshotStore> BookService<S> {
    pub fn new(store: BookStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &BookStore<S> {
        &self.store
    }

    /// Service name, version, book count and known endpoints.
    pub fn summary(&self) -> Result<Summary, HandlerError> {
        let endpoints = [
            ("books", "/books"),
            ("random_book", "/books/random"),
            ("specific_book", "/books/{id}"),
            ("stats", "/stats"),
        ]
        .into_iter()
        .map(|(name, path)| (name.to_string(), path.to_string()))
        .collect::<BTreeMap<_, _>>();

        Ok(Summary {
            message: WELCOME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            total_books: self.store.len()?,
            endpoints,
        })
    }

    pub fn list(&self) -> Result<Vec<Book>, HandlerError> {
        Ok(self.store.get_all()?)
    }

    /// One book chosen uniformly at random.
    pub fn random_pick(&self) -> Result<Book, HandlerError> {
        let books = self.store.read()?;
        let picked = books.iter().choose(&mut rand::thread_rng()).cloned();
        picked.ok_or_else(|| {
            HandlerError::NotFound(
                "Book database is empty. Please add some books first.".to_string(),
            )
        })
    }

    pub fn get_by_id(&self, id: i64) -> Result<Book, HandlerError> {
        let id = checked_id(id)?;
        self.store.get_by_id(id)?.ok_or_else(|| not_found(id))
    }

    /// Validate and insert a new book under the next free id.
    pub fn create(&self, input: NewBook) -> Result<Book, HandlerError> {
        validate_new(&input)?;

        let mut books = self.store.write()?;
        if books.exists(&input.title, &input.author, None) {
            return Err(conflict(input.title.trim(), input.author.trim()));
        }

        let id = books.next_id()?;
        let book = books.add(input.into_book(id))?;
        info!(id = book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Apply the fields present in `patch` to the book at `id`.
    ///
    /// The merged title and author must not duplicate any other book; a
    /// book never conflicts with itself.
    pub fn update(&self, id: i64, patch: BookPatch) -> Result<Book, HandlerError> {
        let id = checked_id(id)?;

        let mut books = self.store.write()?;
        let mut merged = books.get(id).cloned().ok_or_else(|| not_found(id))?;
        validate_patch(&patch)?;

        merged.apply(&patch);
        if books.exists(&merged.title, &merged.author, Some(id)) {
            return Err(conflict(&merged.title, &merged.author));
        }

        let book = books.update(id, merged)?;
        info!(id, "book updated");
        Ok(book)
    }

    pub fn delete(&self, id: i64) -> Result<(), HandlerError> {
        let id = checked_id(id)?;
        if !self.store.delete(id)? {
            return Err(not_found(id));
        }
        info!(id, "book deleted");
        Ok(())
    }

    /// Book count plus the sorted distinct author names.
    pub fn stats(&self) -> Result<Stats, HandlerError> {
        let books = self.store.read()?;
        if books.is_empty() {
            return Ok(Stats::default());
        }

        let authors: Vec<String> = books
            .iter()
            .map(|b| b.author.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Stats {
            total_books: books.len(),
            total_authors: authors.len(),
            authors,
        })
    }
}

/// Parse a raw path segment as a book id. Range checks happen in the
/// handlers, so "0" and "-3" parse fine here.
pub fn parse_book_id(raw: &str) -> Result<i64, HandlerError> {
    raw.trim().parse::<i64>().map_err(|_| invalid_id())
}

fn checked_id(id: i64) -> Result<u64, HandlerError> {
    if id < 1 {
        return Err(invalid_id());
    }
    Ok(id as u64)
}

fn invalid_id() -> HandlerError {
    HandlerError::BadRequest("Book ID must be a positive integer.".to_string())
}

fn not_found(id: u64) -> HandlerError {
    HandlerError::NotFound(format!("Book with ID {} not found.", id))
}

fn conflict(title: &str, author: &str) -> HandlerError {
    HandlerError::Conflict(format!("Book '{}' by {} already exists.", title, author))
}
