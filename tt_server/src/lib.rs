//! HTTP server for the task tracker.
//!
//! Wires the [`task_tracker`] library behind an axum REST API:
//! public authentication endpoints, bearer-token middleware, and
//! per-user task routes.

pub mod api;
pub mod config;
pub mod logging;
