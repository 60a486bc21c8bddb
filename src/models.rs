//! Core data models for the book catalog

use serde::{Deserialize, Serialize};

/// A catalog entry, keyed by isbn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
}

impl Book {
    pub fn new(isbn: &str, title: &str, author: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
        }
    }
}

/// One user's review of one book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub user: String,
    #[serde(rename = "review")]
    pub text: String,
}

/// Body of `PUT /reviews/:isbn`
#[derive(Debug, Deserialize, Serialize)]
pub struct ReviewRequest {
    pub review: String,
}

/// Generic `{ "message": ... }` success body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
