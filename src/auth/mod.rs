//! Authentication Module
//! Mission: Registration, login and JWT-gated access to review mutations

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod user_store;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::{auth_middleware, AuthError};
pub use models::Claims;
pub use user_store::UserStore;
