//! Task API handlers.
//!
//! All endpoints here sit behind the authentication middleware and
//! read the caller's user id from request extensions. Task ids that
//! exist but belong to someone else answer `404 Not Found`, identical
//! to ids that do not exist at all.

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use task_tracker::auth::UserId;
use task_tracker::task::{Task, TaskError, TaskId, TaskUpdate};
use tracing::error;

use super::{AppState, ErrorResponse};

#[derive(Debug, Deserialize)]
pub struct CreateTaskPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Map a task error to a status code and sanitized body.
fn error_response(e: TaskError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        TaskError::MissingTitle => StatusCode::BAD_REQUEST,
        TaskError::NotFound => StatusCode::NOT_FOUND,
        TaskError::Database(_) => {
            error!(error = %e, "task operation failed");
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

/// Create a task owned by the authenticated user.
///
/// # Request Body
///
/// ```json
/// {"title": "Write report", "description": "Quarterly numbers"}
/// ```
///
/// Returns `201 Created` with the task.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, Json<ErrorResponse>)> {
    match state
        .task_manager
        .create(user_id, &payload.title, &payload.description)
        .await
    {
        Ok(task) => Ok((StatusCode::CREATED, Json(task))),
        Err(e) => Err(error_response(e)),
    }
}

/// List the authenticated user's tasks, newest first.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<Vec<Task>>, (StatusCode, Json<ErrorResponse>)> {
    match state.task_manager.list(user_id).await {
        Ok(tasks) => Ok(Json(tasks)),
        Err(e) => Err(error_response(e)),
    }
}

/// Fetch a single task by id.
pub async fn get_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<Task>, (StatusCode, Json<ErrorResponse>)> {
    match state.task_manager.get(user_id, task_id).await {
        Ok(task) => Ok(Json(task)),
        Err(e) => Err(error_response(e)),
    }
}

/// Apply a partial update to a task.
///
/// Absent fields keep their stored values.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(task_id): Path<TaskId>,
    Json(payload): Json<TaskUpdate>,
) -> Result<Json<Task>, (StatusCode, Json<ErrorResponse>)> {
    match state.task_manager.update(user_id, task_id, payload).await {
        Ok(task) => Ok(Json(task)),
        Err(e) => Err(error_response(e)),
    }
}

/// Flip the completion flag on a task.
pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<Task>, (StatusCode, Json<ErrorResponse>)> {
    match state.task_manager.toggle(user_id, task_id).await {
        Ok(task) => Ok(Json(task)),
        Err(e) => Err(error_response(e)),
    }
}

/// Delete a task.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.task_manager.delete(user_id, task_id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Task deleted".to_string(),
        })),
        Err(e) => Err(error_response(e)),
    }
}
