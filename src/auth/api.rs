//! Authentication API Endpoints
//! Mission: Provide registration and login endpoints

use crate::auth::{
    jwt::JwtHandler,
    models::{Credentials, LoginResponse},
    user_store::UserStore,
};
use crate::models::MessageResponse;
use crate::store::StoreError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }

    /// Register a user; bcrypt runs on the blocking pool
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthApiError> {
        let store = self.user_store.clone();
        let (user, pass) = (username.to_string(), password.to_string());

        tokio::task::spawn_blocking(move || store.register(&user, &pass))
            .await
            .map_err(|e| {
                error!("Registration task failed for {}: {}", username, e);
                AuthApiError::InternalError
            })?
            .map_err(|e| match e {
                StoreError::Conflict => {
                    warn!("Registration refused, username taken: {}", username);
                    AuthApiError::UserAlreadyExists
                }
                other => {
                    error!("Registration failed for {}: {}", username, other);
                    AuthApiError::InternalError
                }
            })
    }

    /// Check credentials and issue a token for the user
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, AuthApiError> {
        let store = self.user_store.clone();
        let (user, pass) = (username.to_string(), password.to_string());

        let valid = tokio::task::spawn_blocking(move || store.verify_password(&user, &pass))
            .await
            .map_err(|e| {
                error!("Password check task failed for {}: {}", username, e);
                AuthApiError::InternalError
            })?
            .map_err(|e| {
                error!("Password check failed for {}: {e:#}", username);
                AuthApiError::InternalError
            })?;

        if !valid {
            warn!("❌ Failed login attempt: {}", username);
            return Err(AuthApiError::InvalidCredentials);
        }

        let (token, expires_in) = self.jwt_handler.generate_token(username).map_err(|e| {
            error!("Token generation failed for {}: {e:#}", username);
            AuthApiError::InternalError
        })?;

        info!("✅ Login successful: {}", username);

        Ok(LoginResponse { token, expires_in })
    }
}

/// Register endpoint - POST /register
pub async fn register(
    State(state): State<AuthState>,
    WithRejection(Json(payload), _): WithRejection<Json<Credentials>, AuthApiError>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthApiError> {
    state.register(&payload.username, &payload.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Login endpoint - POST /login
pub async fn login(
    State(state): State<AuthState>,
    WithRejection(Json(payload), _): WithRejection<Json<Credentials>, AuthApiError>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    info!("🔐 Login attempt: {}", payload.username);

    state
        .authenticate(&payload.username, &payload.password)
        .await
        .map(Json)
}

/// Auth API errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthApiError {
    InvalidCredentials,
    UserAlreadyExists,
    InvalidBody { status: StatusCode, message: String },
    InternalError,
}

impl From<JsonRejection> for AuthApiError {
    fn from(rejection: JsonRejection) -> Self {
        AuthApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AuthApiError::UserAlreadyExists => {
                (StatusCode::BAD_REQUEST, "Username already exists".to_string())
            }
            AuthApiError::InvalidBody { status, message } => (status, message),
            AuthApiError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::marker::PhantomData;
    use std::time::{Duration, Instant};

    fn test_state() -> AuthState {
        AuthState::new(
            Arc::new(UserStore::with_cost(4)),
            Arc::new(JwtHandler::new("test-secret".to_string())),
        )
    }

    #[test]
    fn test_auth_api_error_responses() {
        let invalid_creds = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(invalid_creds.status(), StatusCode::UNAUTHORIZED);

        let conflict = AuthApiError::UserAlreadyExists.into_response();
        assert_eq!(conflict.status(), StatusCode::BAD_REQUEST);

        let internal = AuthApiError::InternalError.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_authenticate_issues_verifiable_token() {
        let state = test_state();
        state.register("alice", "pw1").await.unwrap();

        let login = state.authenticate("alice", "pw1").await.unwrap();
        assert_eq!(login.expires_in, 3600);

        let claims = state.jwt_handler.validate_token(&login.token).unwrap();
        assert_eq!(claims.username(), "alice");
    }

    #[tokio::test]
    async fn test_authenticate_rejects_bad_credentials() {
        let state = test_state();
        state.register("alice", "pw1").await.unwrap();

        assert_eq!(
            state.authenticate("alice", "wrong").await.unwrap_err(),
            AuthApiError::InvalidCredentials
        );
        assert_eq!(
            state.authenticate("nobody", "pw1").await.unwrap_err(),
            AuthApiError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let state = test_state();
        let creds = Credentials {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };

        let body = WithRejection(Json(creds.clone()), PhantomData);
        let (status, _) = register(State(state.clone()), body).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let err = register(State(state), WithRejection(Json(creds), PhantomData))
            .await
            .unwrap_err();
        assert_eq!(err, AuthApiError::UserAlreadyExists);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_leaves_runtime_responsive() {
        // A cost high enough that an inline hash would starve the timer below
        let state = AuthState::new(
            Arc::new(UserStore::with_cost(10)),
            Arc::new(JwtHandler::new("test-secret".to_string())),
        );

        let ticker = async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Instant::now()
        };
        let registration = async {
            state.register("alice", "pw1").await.unwrap();
            Instant::now()
        };

        let (ticked, registered) = tokio::join!(ticker, registration);
        assert!(ticked < registered);
    }
}
