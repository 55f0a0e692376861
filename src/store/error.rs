use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
    /// Update addressed an id that is not in the collection.
    UnknownId(u64),
    /// Add addressed an id that is already taken.
    DuplicateId(u64),
    /// The largest id is `u64::MAX`, so no larger id can be assigned.
    IdsExhausted,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "book store lock poisoned during {}", operation)
            }
            StoreError::UnknownId(id) => write!(f, "no book stored under id {}", id),
            StoreError::DuplicateId(id) => write!(f, "a book is already stored under id {}", id),
            StoreError::IdsExhausted => f.write_str("no book ids left to assign"),
        }
    }
}

impl std::error::Error for StoreError {}
