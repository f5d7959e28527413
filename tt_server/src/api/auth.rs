//! Authentication API handlers.
//!
//! HTTP endpoints for the session lifecycle:
//! - Registration with email and password
//! - Login with email/password
//! - Refresh-token rotation
//! - Logout to invalidate the stored refresh token
//!
//! All endpoints return JSON with camelCase keys.
//!
//! # Examples
//!
//! Register a new user:
//! ```bash
//! curl -X POST http://localhost:7000/auth/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"email": "alice@example.com", "password": "secret123"}'
//! ```
//!
//! Refresh a session:
//! ```bash
//! curl -X POST http://localhost:7000/auth/refresh-token \
//!   -H "Content-Type: application/json" \
//!   -d '{"refreshToken": "eyJhbGciOiJIUzI1NiIs..."}'
//! ```

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use task_tracker::auth::{AuthError, AuthSession, UserId};
use tracing::error;

use super::{AppState, ErrorResponse};

/// Fields default to empty so an absent field reports
/// `MissingCredentials` (400) instead of a body-rejection 422.
#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
            user: UserSummary {
                id: session.user.id,
                email: session.user.email,
            },
        }
    }
}

/// Map an auth error to a status code and sanitized body.
fn error_response(e: AuthError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        AuthError::MissingCredentials | AuthError::DuplicateEmail => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials
        | AuthError::TokenInvalid
        | AuthError::TokenExpired
        | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
        AuthError::Database(_) | AuthError::HashingFailed => {
            error!(error = %e, "auth operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: e.client_message(),
        }),
    )
}

/// Register a new user account and open a session for it.
///
/// # Request Body
///
/// ```json
/// {"email": "alice@example.com", "password": "secret123"}
/// ```
///
/// # Response
///
/// On success, returns `201 Created`:
/// ```json
/// {
///   "accessToken": "eyJhbGciOiJIUzI1NiIs...",
///   "refreshToken": "eyJhbGciOiJIUzI1NiIs...",
///   "user": {"id": 1, "email": "alice@example.com"}
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing field or email already registered
/// - `500 Internal Server Error`: Storage or hashing failure
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state
        .auth_manager
        .register(&payload.email, &payload.password)
        .await
    {
        Ok(session) => Ok((StatusCode::CREATED, Json(session.into()))),
        Err(e) => Err(error_response(e)),
    }
}

/// Authenticate a user and open a session.
///
/// Returns the same body shape as registration with `200 OK`.
///
/// # Errors
///
/// - `400 Bad Request`: Missing field
/// - `401 Unauthorized`: Unknown email or wrong password (the response
///   does not distinguish the two)
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state
        .auth_manager
        .login(&payload.email, &payload.password)
        .await
    {
        Ok(session) => Ok(Json(session.into())),
        Err(e) => Err(error_response(e)),
    }
}

/// Exchange a valid refresh token for a fresh token pair.
///
/// The presented token is consumed: replaying it after a successful
/// rotation fails with `401`.
///
/// # Request Body
///
/// ```json
/// {"refreshToken": "eyJhbGciOiJIUzI1NiIs..."}
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid, expired, rotated-away, or revoked token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<TokenPairResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.refresh(&payload.refresh_token).await {
        Ok(tokens) => Ok(Json(TokenPairResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })),
        Err(e) => Err(error_response(e)),
    }
}

/// Logout and invalidate the stored refresh token.
///
/// Requires a valid bearer access token; that token keeps working
/// until it expires naturally, but no refresh is possible afterwards.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.logout(user_id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Logged out".to_string(),
        })),
        Err(e) => Err(error_response(e)),
    }
}
