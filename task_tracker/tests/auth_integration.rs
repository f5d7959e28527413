//! Integration tests for the authentication system.
//!
//! Tests registration, login, refresh-token rotation, logout, and
//! access-token validation against an in-memory database.

use chrono::Duration;
use std::sync::Arc;
use task_tracker::auth::{AuthError, AuthManager, TokenService};
use task_tracker::db::{Database, DatabaseConfig};

const ACCESS_SECRET: &str = "integration_access_secret_0123456789";
const REFRESH_SECRET: &str = "integration_refresh_secret_012345678";

/// Helper to create an auth manager backed by a fresh in-memory database
async fn setup_auth_manager() -> AuthManager {
    let db = Database::new(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");

    let tokens = TokenService::new(ACCESS_SECRET.to_string(), REFRESH_SECRET.to_string());
    AuthManager::new(Arc::new(db.pool().clone()), tokens)
}

#[tokio::test]
async fn test_register_new_user() {
    let auth = setup_auth_manager().await;

    let session = auth
        .register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");

    assert!(session.user.id > 0, "User ID should be positive");
    assert_eq!(session.user.email, "alice@example.com");
    assert_ne!(
        session.tokens.access_token, session.tokens.refresh_token,
        "Access and refresh tokens must differ"
    );
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let auth = setup_auth_manager().await;

    auth.register("alice@example.com", "secret123")
        .await
        .expect("First registration should succeed");

    let result = auth.register("alice@example.com", "other_password").await;
    assert!(
        matches!(result, Err(AuthError::DuplicateEmail)),
        "Should return DuplicateEmail error"
    );
}

#[tokio::test]
async fn test_register_missing_credentials() {
    let auth = setup_auth_manager().await;

    assert!(matches!(
        auth.register("", "secret123").await,
        Err(AuthError::MissingCredentials)
    ));
    assert!(matches!(
        auth.register("alice@example.com", "").await,
        Err(AuthError::MissingCredentials)
    ));
}

#[tokio::test]
async fn test_login_success() {
    let auth = setup_auth_manager().await;

    auth.register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");

    let session = auth
        .login("alice@example.com", "secret123")
        .await
        .expect("Login should succeed");

    assert_eq!(session.user.email, "alice@example.com");
    let user_id = auth
        .validate_access_token(&session.tokens.access_token)
        .await
        .expect("Fresh access token should validate");
    assert_eq!(user_id, session.user.id);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let auth = setup_auth_manager().await;

    auth.register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");

    let wrong_password = auth.login("alice@example.com", "not_the_password").await;
    let unknown_email = auth.login("nobody@example.com", "secret123").await;

    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
    assert!(
        matches!(unknown_email, Err(AuthError::InvalidCredentials)),
        "Unknown email must fail the same way as a wrong password"
    );
}

#[tokio::test]
async fn test_login_invalidates_previous_refresh_token() {
    let auth = setup_auth_manager().await;

    let first = auth
        .register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");
    let second = auth
        .login("alice@example.com", "secret123")
        .await
        .expect("Login should succeed");

    assert!(
        matches!(
            auth.refresh(&first.tokens.refresh_token).await,
            Err(AuthError::TokenInvalid)
        ),
        "Refresh token from before the login must be dead"
    );
    auth.refresh(&second.tokens.refresh_token)
        .await
        .expect("Latest refresh token should work");
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let auth = setup_auth_manager().await;

    let session = auth
        .register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");

    let rotated = auth
        .refresh(&session.tokens.refresh_token)
        .await
        .expect("Refresh should succeed");

    assert_ne!(rotated.refresh_token, session.tokens.refresh_token);

    // The old token was consumed by the rotation.
    let replay = auth.refresh(&session.tokens.refresh_token).await;
    assert!(
        matches!(replay, Err(AuthError::TokenInvalid)),
        "Replaying a rotated refresh token must fail"
    );

    // The rotated token is the live one.
    auth.refresh(&rotated.refresh_token)
        .await
        .expect("Rotated token should refresh again");
}

#[tokio::test]
async fn test_refresh_with_garbage_token() {
    let auth = setup_auth_manager().await;

    let result = auth.refresh("not.a.jwt").await;
    assert!(matches!(result, Err(AuthError::TokenInvalid)));
}

#[tokio::test]
async fn test_refresh_with_access_token_fails() {
    let auth = setup_auth_manager().await;

    let session = auth
        .register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");

    // Signed with the access secret, so the refresh verifier rejects it.
    let result = auth.refresh(&session.tokens.access_token).await;
    assert!(matches!(result, Err(AuthError::TokenInvalid)));
}

#[tokio::test]
async fn test_expired_refresh_token() {
    let db = Database::new(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");

    let tokens = TokenService::with_expiry(
        ACCESS_SECRET.to_string(),
        REFRESH_SECRET.to_string(),
        Duration::minutes(15),
        Duration::seconds(-30),
    );
    let auth = AuthManager::new(Arc::new(db.pool().clone()), tokens);

    let session = auth
        .register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");

    let result = auth.refresh(&session.tokens.refresh_token).await;
    assert!(
        matches!(result, Err(AuthError::TokenExpired)),
        "Expiry must be reported as expired, not merely invalid"
    );
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let auth = setup_auth_manager().await;

    let session = auth
        .register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");

    auth.logout(session.user.id)
        .await
        .expect("Logout should succeed");

    let result = auth.refresh(&session.tokens.refresh_token).await;
    assert!(
        matches!(result, Err(AuthError::TokenInvalid)),
        "Refresh after logout must fail"
    );

    // Access tokens are stateless and survive logout until they expire.
    auth.validate_access_token(&session.tokens.access_token)
        .await
        .expect("Access token should still validate after logout");
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let auth = setup_auth_manager().await;

    let session = auth
        .register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");

    auth.logout(session.user.id).await.expect("First logout");
    auth.logout(session.user.id)
        .await
        .expect("Second logout should also succeed");
}

#[tokio::test]
async fn test_validate_access_token_rejects_refresh_token() {
    let auth = setup_auth_manager().await;

    let session = auth
        .register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed");

    let result = auth
        .validate_access_token(&session.tokens.refresh_token)
        .await;
    assert!(matches!(result, Err(AuthError::TokenInvalid)));
}
