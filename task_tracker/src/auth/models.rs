//! Authentication data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User ID type
pub type UserId = i64;

/// Public user identity. The password hash and the stored refresh
/// token live only in the `users` table and in local variables inside
/// the manager; they are never part of this struct and never
/// serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Access/refresh token pair issued by login, register, and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token pair plus the identity it belongs to, returned by register
/// and login (refresh returns tokens only)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: SessionTokens,
}

/// JWT claims carried by both access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User ID
    pub sub: UserId,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
    /// Unique token id. Two tokens minted for the same user within the
    /// same second still differ.
    pub jti: String,
}
