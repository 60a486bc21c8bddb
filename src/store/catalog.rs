//! Book catalog store
//! Mission: Serve read-only lookups over the seeded book list

use crate::models::Book;
use crate::store::StoreError;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Read-only catalog; books are fixed once the store is built
#[derive(Debug)]
pub struct CatalogStore {
    books: Vec<Book>,
}

impl CatalogStore {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// Catalog with the default two-book seed
    pub fn seeded() -> Self {
        Self::new(vec![
            Book::new("123-456789", "The Great Gatsby", "F. Scott Fitzgerald"),
            Book::new("987-654321", "To Kill a Mockingbird", "Harper Lee"),
        ])
    }

    /// Load a catalog from a JSON array of books
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let books: Vec<Book> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid catalog JSON in {}", path.display()))?;

        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.isbn.as_str()) {
                bail!("Duplicate isbn {} in {}", book.isbn, path.display());
            }
        }

        info!("📚 Loaded {} books from {}", books.len(), path.display());
        Ok(Self::new(books))
    }

    /// All books in insertion order
    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Result<&Book, StoreError> {
        self.books
            .iter()
            .find(|b| b.isbn == isbn)
            .ok_or(StoreError::NotFound)
    }

    /// Case-insensitive substring match on author
    pub fn find_by_author(&self, author: &str) -> Vec<Book> {
        self.filter_by(author, |b| b.author.as_str())
    }

    /// Case-insensitive substring match on title
    pub fn find_by_title(&self, title: &str) -> Vec<Book> {
        self.filter_by(title, |b| b.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn filter_by<F>(&self, needle: &str, field: F) -> Vec<Book>
    where
        F: Fn(&Book) -> &str,
    {
        let needle = needle.to_lowercase();
        self.books
            .iter()
            .filter(|b| field(b).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_list_all_keeps_seed_order() {
        let store = CatalogStore::seeded();
        let isbns: Vec<&str> = store.list_all().iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["123-456789", "987-654321"]);
    }

    #[test]
    fn test_find_by_isbn() {
        let store = CatalogStore::seeded();

        let book = store.find_by_isbn("987-654321").unwrap();
        assert_eq!(book.title, "To Kill a Mockingbird");

        assert_eq!(store.find_by_isbn("000-000000"), Err(StoreError::NotFound));
        // Exact match only
        assert_eq!(store.find_by_isbn("123"), Err(StoreError::NotFound));
    }

    #[test]
    fn test_find_by_author_case_insensitive() {
        let store = CatalogStore::seeded();

        let books = store.find_by_author("harper");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].author, "Harper Lee");

        assert_eq!(store.find_by_author("SCOTT").len(), 1);
        assert!(store.find_by_author("tolkien").is_empty());
    }

    #[test]
    fn test_find_by_title_case_insensitive() {
        let store = CatalogStore::seeded();

        let books = store.find_by_title("gatsby");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].isbn, "123-456789");

        // "the" appears in one title only
        assert_eq!(store.find_by_title("THE").len(), 1);
        assert!(store.find_by_title("hobbit").is_empty());
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        let store = CatalogStore::seeded();
        assert_eq!(store.find_by_author("").len(), 2);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"isbn":"111","title":"Dune","author":"Frank Herbert"}},
                {{"isbn":"222","title":"Emma","author":"Jane Austen"}}]"#
        )
        .unwrap();

        let store = CatalogStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_author("austen")[0].title, "Emma");
    }

    #[test]
    fn test_load_rejects_duplicate_isbn() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"isbn":"111","title":"A","author":"X"}},
                {{"isbn":"111","title":"B","author":"Y"}}]"#
        )
        .unwrap();

        let err = CatalogStore::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate isbn 111"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = CatalogStore::from_json_file(Path::new("/nonexistent/catalog.json"));
        assert!(result.is_err());
    }
}
