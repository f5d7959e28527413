//! Dual-secret JWT issuance and verification.
//!
//! Access and refresh tokens are both HS256 JWTs carrying the same
//! claims shape, but they are signed with two independent secrets and
//! different expiry windows. Verification here is purely stateless:
//! signature plus expiry. The session manager layers the stored-value
//! equality check on top for refresh tokens; this service knows
//! nothing about the credential store.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use uuid::Uuid;

use super::{
    errors::{AuthError, AuthResult},
    models::{AccessTokenClaims, UserId},
};

/// Issues and verifies signed access/refresh tokens.
///
/// Pure function of its secrets and the current time; holds no
/// connection to storage and performs no lookups.
#[derive(Clone)]
pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
    access_token_duration: Duration,
    refresh_token_duration: Duration,
}

impl TokenService {
    /// Create a token service with the standard expiry policy:
    /// 15-minute access tokens, 7-day refresh tokens.
    ///
    /// Both secrets are required, externally supplied configuration.
    /// There is no random fallback: tokens must stay verifiable across
    /// process restarts.
    pub fn new(access_secret: String, refresh_secret: String) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_token_duration: Duration::minutes(15),
            refresh_token_duration: Duration::days(7),
        }
    }

    /// Create a token service with explicit expiry windows. Intended
    /// for tests that need already-expired or near-expiry tokens.
    pub fn with_expiry(
        access_secret: String,
        refresh_secret: String,
        access_token_duration: Duration,
        refresh_token_duration: Duration,
    ) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_token_duration,
            refresh_token_duration,
        }
    }

    /// Sign a short-lived access token for `user_id`.
    pub fn issue_access_token(&self, user_id: UserId) -> AuthResult<String> {
        sign(user_id, &self.access_secret, self.access_token_duration)
    }

    /// Sign a long-lived refresh token for `user_id`.
    pub fn issue_refresh_token(&self, user_id: UserId) -> AuthResult<String> {
        sign(user_id, &self.refresh_secret, self.refresh_token_duration)
    }

    /// Verify an access token's signature and expiry.
    ///
    /// # Errors
    ///
    /// * `AuthError::TokenExpired` - Expiry has elapsed
    /// * `AuthError::TokenInvalid` - Bad signature or malformed token
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        verify(token, &self.access_secret)
    }

    /// Verify a refresh token's signature and expiry.
    ///
    /// This is only half of refresh-token validity: the caller must
    /// also check the presented value against the one stored for the
    /// user.
    pub fn verify_refresh_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        verify(token, &self.refresh_secret)
    }
}

fn sign(user_id: UserId, secret: &str, ttl: Duration) -> AuthResult<String> {
    let now = Utc::now();
    let claims = AccessTokenClaims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::TokenInvalid)
}

fn verify(token: &str, secret: &str) -> AuthResult<AccessTokenClaims> {
    let mut validation = Validation::default();
    // Expired means expired; the default 60s leeway would let a token
    // outlive its stated window.
    validation.leeway = 0;

    match decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
            _ => Err(AuthError::TokenInvalid),
        },
    }
}
