//! # Task Tracker
//!
//! Per-user task tracking behind an authentication boundary.
//!
//! The library is split into three modules:
//!
//! - [`auth`]: credential registration, login, dual-token session
//!   management with refresh-token rotation, and access-token
//!   validation for the HTTP auth gate.
//! - [`task`]: ownership-scoped CRUD over task records. Every
//!   operation is keyed by the authenticated user id; records owned
//!   by another user are indistinguishable from missing ones.
//! - [`db`]: SQLite connection pooling and schema setup via sqlx.
//!
//! Access tokens are short-lived (15 minutes) and verified
//! statelessly; refresh tokens are long-lived (7 days) and checked
//! against the single stored value per user, which is what makes
//! them revocable. Issuing a new refresh token always invalidates
//! the previous one.

/// Authentication: users, tokens, sessions.
pub mod auth;
pub use auth::{AuthError, AuthManager, AuthResult, SessionTokens, TokenService, User, UserId};

/// Database connection pooling and schema.
pub mod db;
pub use db::{Database, DatabaseConfig};

/// Ownership-scoped task records.
pub mod task;
pub use task::{Task, TaskError, TaskManager, TaskResult};
