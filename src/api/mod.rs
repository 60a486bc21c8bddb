//! HTTP surface
//!
//! Public catalog and review reads, registration/login, and the JWT-gated
//! review mutations, merged into one router.

pub mod books;
pub mod error;
pub mod reviews;

pub use error::ApiError;

use crate::auth::{api as auth_api, auth_middleware, AuthState};
use crate::middleware::request_logging;
use crate::store::{CatalogStore, ReviewStore};
use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Catalog and review state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub reviews: Arc<ReviewStore>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogStore>, reviews: Arc<ReviewStore>) -> Self {
        Self { catalog, reviews }
    }
}

/// Build the full application router
pub fn router(app_state: AppState, auth_state: AuthState) -> Router {
    let jwt_handler = auth_state.jwt_handler.clone();

    let auth_router = Router::new()
        .route("/register", post(auth_api::register))
        .route("/login", post(auth_api::login))
        .with_state(auth_state);

    // Review mutations need a verified identity
    let protected_routes = Router::new()
        .route(
            "/reviews/:isbn",
            put(reviews::upsert_review).delete(reviews::delete_review),
        )
        .route_layer(middleware::from_fn_with_state(jwt_handler, auth_middleware))
        .with_state(app_state.clone());

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/books", get(books::list_books))
        .route("/books/isbn/:isbn", get(books::get_book_by_isbn))
        .route("/books/author/:author", get(books::get_books_by_author))
        .route("/books/title/:title", get(books::get_books_by_title))
        .route("/reviews/:isbn", get(reviews::list_reviews))
        .with_state(app_state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_router)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
