//! Book records and the payloads exchanged with the service.
//!
//! `Book` is the stored shape. `NewBook` and `BookPatch` are the create and
//! partial-update bodies; neither carries an `id`, which is always assigned
//! by the store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single book in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub genre: String,
}

impl Book {
    /// True if `title` and `author` match this book, ignoring case and
    /// surrounding whitespace.
    pub fn same_work(&self, title: &str, author: &str) -> bool {
        normalize(&self.title) == normalize(title) && normalize(&self.author) == normalize(author)
    }

    /// Apply the fields present in `patch`. Title and author are trimmed;
    /// the id never changes.
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(author) = &patch.author {
            self.author = author.trim().to_string();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Body of a create request. All fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub genre: String,
}

impl NewBook {
    /// Build the stored record under `id`, trimming title and author.
    pub fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            price: self.price,
            genre: self.genre,
        }
    }
}

/// Body of an update request. Absent and `null` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Aggregate figures over the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_books: usize,
    pub total_authors: usize,
    /// Distinct author names, sorted.
    pub authors: Vec<String>,
}

/// Payload of the service root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub message: String,
    pub version: String,
    pub total_books: usize,
    pub endpoints: BTreeMap<String, String>,
}
