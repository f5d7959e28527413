//! Session management: registration, login, refresh rotation, logout.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};

use super::{
    errors::{AuthError, AuthResult},
    models::{AuthSession, SessionTokens, User, UserId},
    tokens::TokenService,
};

/// Coordinates the credential store and the token service.
///
/// All persistent state lives in the `users` table; the manager itself
/// is cheap to clone and share across request handlers.
#[derive(Clone)]
pub struct AuthManager {
    pool: Arc<SqlitePool>,
    tokens: TokenService,
}

impl AuthManager {
    pub fn new(pool: Arc<SqlitePool>, tokens: TokenService) -> Self {
        Self { pool, tokens }
    }

    /// Register a new user and open a session for them.
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingCredentials` - Empty email or password
    /// * `AuthError::DuplicateEmail` - Email already registered
    pub async fn register(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let password_hash = hash_password(password)?;
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, created_at)
             VALUES (?1, ?2, ?3)
             RETURNING id",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(created_at)
        .fetch_one(&*self.pool)
        .await;

        let row = match result {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => {
                warn!(email, "registration rejected: email already taken");
                return Err(AuthError::DuplicateEmail);
            }
            Err(e) => return Err(e.into()),
        };
        let id: UserId = row.get("id");

        info!(user_id = id, "user registered");
        let user = User {
            id,
            email: email.to_string(),
            created_at,
        };
        let tokens = self.open_session(id).await?;
        Ok(AuthSession { user, tokens })
    }

    /// Authenticate an email/password pair and open a session.
    ///
    /// Unknown email and wrong password produce the same error, so a
    /// caller probing for registered addresses learns nothing.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&*self.pool)
        .await?;

        let Some(row) = row else {
            warn!(email, "login failed: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let stored_hash: String = row.get("password_hash");
        if !verify_password(password, &stored_hash) {
            warn!(email, "login failed: bad password");
            return Err(AuthError::InvalidCredentials);
        }

        let id: UserId = row.get("id");
        let created_at: DateTime<Utc> = row.get("created_at");

        info!(user_id = id, "user logged in");
        let user = User {
            id,
            email: email.to_string(),
            created_at,
        };
        let tokens = self.open_session(id).await?;
        Ok(AuthSession { user, tokens })
    }

    /// Exchange a valid refresh token for a fresh token pair.
    ///
    /// Rotation is a single compare-and-swap: the stored token is
    /// replaced only if it still equals the presented one. A token that
    /// was already rotated away, revoked by logout, or never issued all
    /// fail the same way. Under concurrent refreshes with the same
    /// token, exactly one caller wins.
    ///
    /// # Errors
    ///
    /// * `AuthError::TokenExpired` - Refresh token past its window
    /// * `AuthError::TokenInvalid` - Bad signature, or not the stored token
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<SessionTokens> {
        let claims = self.tokens.verify_refresh_token(refresh_token)?;
        let user_id = claims.sub;

        let new_refresh = self.tokens.issue_refresh_token(user_id)?;
        let result = sqlx::query(
            "UPDATE users SET refresh_token = ?1 WHERE id = ?2 AND refresh_token = ?3",
        )
        .bind(&new_refresh)
        .bind(user_id)
        .bind(refresh_token)
        .execute(&*self.pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!(user_id, "refresh rejected: token is not the stored one");
            return Err(AuthError::TokenInvalid);
        }

        let access_token = self.tokens.issue_access_token(user_id)?;
        info!(user_id, "session refreshed");
        Ok(SessionTokens {
            access_token,
            refresh_token: new_refresh,
        })
    }

    /// Revoke the user's stored refresh token.
    ///
    /// Idempotent: logging out with no active session is not an error.
    /// Outstanding access tokens stay valid until they expire.
    pub async fn logout(&self, user_id: UserId) -> AuthResult<()> {
        sqlx::query("UPDATE users SET refresh_token = NULL WHERE id = ?1")
            .bind(user_id)
            .execute(&*self.pool)
            .await?;
        info!(user_id, "user logged out");
        Ok(())
    }

    /// Verify an access token and resolve it to an existing user.
    ///
    /// # Errors
    ///
    /// * `AuthError::TokenExpired` / `AuthError::TokenInvalid` - Token
    ///   failed verification
    /// * `AuthError::Unauthenticated` - Token is fine but its user no
    ///   longer exists
    pub async fn validate_access_token(&self, token: &str) -> AuthResult<UserId> {
        let claims = self.tokens.verify_access_token(token)?;

        let exists = sqlx::query("SELECT 1 FROM users WHERE id = ?1")
            .bind(claims.sub)
            .fetch_optional(&*self.pool)
            .await?;
        if exists.is_none() {
            warn!(user_id = claims.sub, "valid token for a missing user");
            return Err(AuthError::Unauthenticated);
        }
        Ok(claims.sub)
    }

    async fn open_session(&self, user_id: UserId) -> AuthResult<SessionTokens> {
        let access_token = self.tokens.issue_access_token(user_id)?;
        let refresh_token = self.tokens.issue_refresh_token(user_id)?;

        // Overwrites whatever was stored: opening a session invalidates
        // any previous refresh token for this user.
        sqlx::query("UPDATE users SET refresh_token = ?1 WHERE id = ?2")
            .bind(&refresh_token)
            .bind(user_id)
            .execute(&*self.pool)
            .await?;

        Ok(SessionTokens {
            access_token,
            refresh_token,
        })
    }
}

fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
