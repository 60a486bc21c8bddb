//! JSON error responses for catalog and review routes

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BookNotFound,
    ReviewsNotFound,
    /// Request body missing, not JSON, or missing fields
    InvalidBody { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BookNotFound => (StatusCode::NOT_FOUND, "Book not found".to_string()),
            ApiError::ReviewsNotFound => (
                StatusCode::NOT_FOUND,
                "No reviews found for this book".to_string(),
            ),
            ApiError::InvalidBody { status, message } => (status, message),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_responses() {
        assert_eq!(
            ApiError::BookNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );

        let invalid = ApiError::InvalidBody {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `review`".to_string(),
        };
        assert_eq!(
            invalid.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
