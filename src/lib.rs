mod book;
pub mod config;
mod service;
mod snapshot;
mod store;
mod validation;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use book::{Book, BookPatch, NewBook, Stats, Summary};
pub use config::Config;
pub use service::{parse_book_id, BookService, HandlerError};
pub use snapshot::{InMemorySnapshot, JsonFileSnapshot, SnapshotError, SnapshotStore};
pub use store::{BookStore, Books, BooksWriter, StoreError, DEFAULT_GENRE, DEFAULT_PRICE};
pub use validation::{
    validate_author, validate_genre, validate_new, validate_patch, validate_price,
    validate_title, ValidationError,
};
