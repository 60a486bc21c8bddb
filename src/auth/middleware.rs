//! Authentication Middleware
//! Mission: Gate review mutations behind a verified bearer token

use crate::auth::jwt::JwtHandler;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Auth middleware that validates JWT tokens and attaches the claims to the request
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // A blank header counts as no header at all
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .filter(|value| !value.as_bytes().iter().all(u8::is_ascii_whitespace))
        .ok_or(AuthError::MissingToken)?;

    // "<scheme> <token>": only the second word matters
    let token = header
        .to_str()
        .ok()
        .and_then(|s| s.split_whitespace().nth(1))
        .ok_or(AuthError::InvalidToken)?;

    let claims = jwt_handler.validate_token(token).map_err(|e| {
        warn!(path = %req.uri().path(), "Rejected token: {e:#}");
        AuthError::InvalidToken
    })?;

    // Handlers pick this up with `Extension<Claims>`
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Auth error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "No token provided",
            AuthError::InvalidToken => "Invalid token",
        };

        (StatusCode::FORBIDDEN, Json(json!({ "error": message }))).into_response()
    }
}
