//! Review endpoints
//!
//! Listing is public; `PUT` and `DELETE` sit behind [`auth_middleware`], which
//! leaves the verified [`Claims`] in the request extensions.
//!
//! [`auth_middleware`]: crate::auth::auth_middleware

use crate::api::{error::ApiError, AppState};
use crate::auth::Claims;
use crate::models::{MessageResponse, Review, ReviewRequest};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use tracing::info;

/// GET /reviews/:isbn
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Json<Vec<Review>> {
    Json(state.reviews.list_for_isbn(&isbn))
}

/// PUT /reviews/:isbn
pub async fn upsert_review(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(payload), _): WithRejection<Json<ReviewRequest>, ApiError>,
) -> Json<MessageResponse> {
    let outcome = state
        .reviews
        .upsert(&isbn, claims.username(), &payload.review);

    info!("📝 {} by {} on {}", outcome.message(), claims.username(), isbn);

    Json(MessageResponse::new(outcome.message()))
}

/// DELETE /reviews/:isbn
pub async fn delete_review(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = state
        .reviews
        .delete_by_user(&isbn, claims.username())
        .map_err(|_| ApiError::ReviewsNotFound)?;

    info!("🗑️  Review removed by {} on {}", claims.username(), isbn);

    Ok(Json(MessageResponse::new(outcome.message())))
}
