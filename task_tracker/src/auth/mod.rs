//! Authentication module providing user registration, login, and session management.
//!
//! This module implements secure authentication with:
//! - Argon2id password hashing
//! - JWT access tokens (15-minute expiry) signed with a dedicated secret
//! - Rotating refresh tokens (7-day expiry) signed with a second,
//!   independent secret and checked against the single stored value
//!   per user
//!
//! A user holds at most one valid refresh token at any time. Login and
//! refresh both overwrite the stored value, so concurrent sessions are
//! not supported by design: whichever session refreshes last holds the
//! only usable token.
//!
//! ## Example
//!
//! ```no_run
//! use task_tracker::auth::{AuthManager, TokenService};
//! use task_tracker::db::{Database, DatabaseConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::default()).await?;
//!     db.migrate().await?;
//!     let tokens = TokenService::new("access_secret".into(), "refresh_secret".into());
//!     let auth = AuthManager::new(Arc::new(db.pool().clone()), tokens);
//!
//!     let session = auth.register("user@example.com", "hunter2!").await?;
//!     println!("Registered user: {}", session.user.email);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod tokens;

pub use errors::{AuthError, AuthResult};
pub use manager::AuthManager;
pub use models::{AccessTokenClaims, AuthSession, SessionTokens, User, UserId};
pub use tokens::TokenService;
