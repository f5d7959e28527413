//! HTTP API for the task tracking server.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework
//! - **Tower**: Middleware for CORS and authentication
//! - **JWT**: Token-based authentication with access/refresh tokens
//!
//! # Modules
//!
//! - [`auth`]: User authentication (register, login, logout, token refresh)
//! - [`tasks`]: Per-user task CRUD
//! - [`middleware`]: Authentication middleware for protected endpoints
//! - [`request_id`]: Request ID correlation for logging
//!
//! # Endpoints Overview
//!
//! ## Authentication (No Auth Required)
//! - `POST /auth/register` - Register new user
//! - `POST /auth/login` - Login with credentials
//! - `POST /auth/refresh-token` - Rotate refresh token, get new pair
//!
//! ## Authentication (Auth Required)
//! - `POST /auth/logout` - Invalidate the stored refresh token
//!
//! ## Tasks (Auth Required)
//! - `POST /tasks` - Create task
//! - `GET /tasks` - List own tasks, newest first
//! - `GET /tasks/{id}` - Get task
//! - `PUT /tasks/{id}` - Update task
//! - `PATCH /tasks/{id}/toggle` - Flip completion
//! - `DELETE /tasks/{id}` - Delete task
//!
//! ## Health Check
//! - `GET /health` - Server health status
//!
//! # Security
//!
//! - JWT access tokens expire after 15 minutes
//! - JWT refresh tokens expire after 7 days and rotate on every use
//! - Passwords are hashed with Argon2id before storage
//! - Task ids belonging to other users answer 404, never 403

pub mod auth;
pub mod middleware;
pub mod request_id;
pub mod tasks;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, patch, post},
};
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;
use task_tracker::{auth::AuthManager, task::TaskManager};
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; cheap because every field is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub auth_manager: Arc<AuthManager>,
    pub task_manager: Arc<TaskManager>,
    pub pool: Arc<SqlitePool>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Endpoint Summary
///
/// ```text
/// GET    /health                - Health check (public)
/// POST   /auth/register         - Register user (public)
/// POST   /auth/login            - Login (public)
/// POST   /auth/refresh-token    - Rotate refresh token (public)
/// POST   /auth/logout           - Logout (auth required)
/// POST   /tasks                 - Create task (auth required)
/// GET    /tasks                 - List tasks (auth required)
/// GET    /tasks/{id}            - Get task (auth required)
/// PUT    /tasks/{id}            - Update task (auth required)
/// PATCH  /tasks/{id}/toggle     - Toggle completion (auth required)
/// DELETE /tasks/{id}            - Delete task (auth required)
/// ```
pub fn create_router(state: AppState) -> Router {
    // Public routes (no authentication middleware)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh-token", post(auth::refresh_token));

    // Protected routes (require authentication middleware)
    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/tasks", post(tasks::create_task).get(tasks::list_tasks))
        .route(
            "/tasks/{task_id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/{task_id}/toggle", patch(tasks::toggle_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the database answers a trivial query, or
/// `503 Service Unavailable` when it does not.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1").execute(&*state.pool).await.is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
