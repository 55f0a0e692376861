//! Field-level validation for book payloads.
//!
//! Every check is stateless and knows nothing about storage. Lengths are
//! measured in characters after trimming surrounding whitespace.

use std::error::Error;
use std::fmt;

use crate::book::{BookPatch, NewBook};

pub const TITLE_MIN_LEN: usize = 2;
pub const TITLE_MAX_LEN: usize = 200;
pub const AUTHOR_MIN_LEN: usize = 2;
pub const AUTHOR_MAX_LEN: usize = 100;

/// A field failed validation. Carries the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(reason: &str) -> Self {
        ValidationError(reason.to_string())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ValidationError {}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::new("Book title cannot be empty."));
    }
    if len < TITLE_MIN_LEN {
        return Err(ValidationError::new(
            "Title must be at least 2 characters long.",
        ));
    }
    if len > TITLE_MAX_LEN {
        return Err(ValidationError::new(
            "Title must be less than 200 characters.",
        ));
    }
    Ok(())
}

pub fn validate_author(author: &str) -> Result<(), ValidationError> {
    let len = author.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::new("Author name cannot be empty."));
    }
    if len < AUTHOR_MIN_LEN {
        return Err(ValidationError::new(
            "Author name must be at least 2 characters long.",
        ));
    }
    if len > AUTHOR_MAX_LEN {
        return Err(ValidationError::new(
            "Author name must be less than 100 characters.",
        ));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    // NaN compares false against zero, so check it explicitly.
    if price.is_nan() || price < 0.0 {
        return Err(ValidationError::new("Price cannot be negative."));
    }
    Ok(())
}

pub fn validate_genre(genre: &str) -> Result<(), ValidationError> {
    if genre.trim().is_empty() {
        return Err(ValidationError::new("Genre cannot be empty."));
    }
    Ok(())
}

/// Validate every field of a create body, in title/author/price/genre order.
pub fn validate_new(book: &NewBook) -> Result<(), ValidationError> {
    validate_title(&book.title)?;
    validate_author(&book.author)?;
    validate_price(book.price)?;
    validate_genre(&book.genre)
}

/// Validate only the fields present in an update body.
pub fn validate_patch(patch: &BookPatch) -> Result<(), ValidationError> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(author) = &patch.author {
        validate_author(author)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(genre) = &patch.genre {
        validate_genre(genre)?;
    }
    Ok(())
}
