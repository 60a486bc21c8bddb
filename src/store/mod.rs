//! In-memory stores for books and reviews.
//!
//! Each store owns its collection and is shared with handlers through `Arc`.
//! Nothing here survives a restart.

pub mod catalog;
pub mod reviews;

pub use catalog::CatalogStore;
pub use reviews::{ReviewOutcome, ReviewStore};

/// Store-level failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Unknown isbn or no review list for it
    NotFound,
    /// Key already taken
    Conflict,
    /// Password hashing failed
    Credential(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "Not found"),
            StoreError::Conflict => write!(f, "Already exists"),
            StoreError::Credential(e) => write!(f, "Credential hashing failed: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}
