//! Bookshelf Backend Library
//!
//! Book catalog and review service: stores, JWT auth, HTTP routes and a
//! small async client for the catalog endpoints.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod middleware;
pub mod models;
pub mod store;

pub use api::{router, AppState};
pub use config::Config;
