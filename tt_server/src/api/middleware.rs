//! Authentication middleware for protected endpoints.
//!
//! Extracts and validates the JWT access token from the Authorization
//! header, then injects the authenticated user id into request
//! extensions for downstream handlers.
//!
//! # Extracting User ID
//!
//! In handler functions, extract the user id from request extensions:
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//!
//! async fn protected_handler(Extension(user_id): Extension<i64>) -> String {
//!     format!("Authenticated as user {}", user_id)
//! }
//! # let _ = protected_handler;
//! ```

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::logging::log_security_event;

use super::AppState;

/// Authentication middleware that validates JWT tokens and injects user ID.
///
/// Expects `Authorization: Bearer <token>`. On success the user id is
/// inserted into request extensions and the request proceeds; a
/// missing header, malformed value, failed verification, or a token
/// whose user no longer exists all answer `401 Unauthorized`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Extract token from Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match auth_header {
        Some(t) => t,
        None => return Err(StatusCode::UNAUTHORIZED),
    };

    // Verify token, confirm the user still exists, and get user ID
    match state.auth_manager.validate_access_token(token).await {
        Ok(user_id) => {
            request.extensions_mut().insert(user_id);
            Ok(next.run(request).await)
        }
        Err(e) => {
            log_security_event("rejected_access_token", None, &e.to_string());
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
