//! Review store
//! Mission: Hold per-book reviews, at most one per user per book

use crate::models::Review;
use crate::store::StoreError;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Result of a successful review mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Added,
    Updated,
    Deleted,
}

impl ReviewOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ReviewOutcome::Added => "Review added",
            ReviewOutcome::Updated => "Review updated",
            ReviewOutcome::Deleted => "Review deleted",
        }
    }
}

/// isbn -> reviews in insertion order
#[derive(Default)]
pub struct ReviewStore {
    reviews: RwLock<HashMap<String, Vec<Review>>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reviews for an isbn; empty if none were ever written
    pub fn list_for_isbn(&self, isbn: &str) -> Vec<Review> {
        self.reviews.read().get(isbn).cloned().unwrap_or_default()
    }

    /// Add the user's review or replace its text if one exists
    pub fn upsert(&self, isbn: &str, username: &str, text: &str) -> ReviewOutcome {
        let mut reviews = self.reviews.write();
        let list = reviews.entry(isbn.to_string()).or_default();

        let outcome = match list.iter_mut().find(|r| r.user == username) {
            Some(existing) => {
                existing.text = text.to_string();
                ReviewOutcome::Updated
            }
            None => {
                list.push(Review {
                    user: username.to_string(),
                    text: text.to_string(),
                });
                ReviewOutcome::Added
            }
        };

        debug!(isbn, user = username, ?outcome, "Review upserted");
        outcome
    }

    /// Drop the user's review. Only fails when the isbn has no review list at all;
    /// a list without the user's entry still counts as deleted.
    pub fn delete_by_user(&self, isbn: &str, username: &str) -> Result<ReviewOutcome, StoreError> {
        let mut reviews = self.reviews.write();
        let list = reviews.get_mut(isbn).ok_or(StoreError::NotFound)?;

        let before = list.len();
        list.retain(|r| r.user != username);

        debug!(
            isbn,
            user = username,
            removed = before - list.len(),
            "Review deleted"
        );
        Ok(ReviewOutcome::Deleted)
    }
}
