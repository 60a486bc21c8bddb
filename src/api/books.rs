//! Catalog endpoints (public)

use crate::api::{error::ApiError, AppState};
use crate::models::Book;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

/// GET /books
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.catalog.list_all().to_vec())
}

/// GET /books/isbn/:isbn
pub async fn get_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ApiError> {
    state
        .catalog
        .find_by_isbn(&isbn)
        .map(|book| Json(book.clone()))
        .map_err(|_| {
            debug!("Book lookup miss: {}", isbn);
            ApiError::BookNotFound
        })
}

/// GET /books/author/:author
pub async fn get_books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Json<Vec<Book>> {
    Json(state.catalog.find_by_author(&author))
}

/// GET /books/title/:title
pub async fn get_books_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Json<Vec<Book>> {
    Json(state.catalog.find_by_title(&title))
}
