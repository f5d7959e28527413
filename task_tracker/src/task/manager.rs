//! Ownership-scoped task CRUD.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::UserId;

use super::{
    errors::{TaskError, TaskResult},
    models::{Task, TaskId, TaskUpdate},
};

/// Task operations for authenticated users.
///
/// Every query is keyed by both task id and owner id. A task belonging
/// to someone else behaves exactly like a task that does not exist, so
/// nothing a caller can do distinguishes the two.
#[derive(Clone)]
pub struct TaskManager {
    pool: Arc<SqlitePool>,
}

impl TaskManager {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Create a task owned by `user_id`.
    ///
    /// # Errors
    ///
    /// * `TaskError::MissingTitle` - Empty or whitespace-only title
    pub async fn create(
        &self,
        user_id: UserId,
        title: &str,
        description: &str,
    ) -> TaskResult<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::MissingTitle);
        }

        let now = Utc::now();
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (user_id, title, description, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, 0, ?4, ?4)
             RETURNING id, user_id, title, description, completed, created_at, updated_at",
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(now)
        .fetch_one(&*self.pool)
        .await?;

        info!(user_id, task_id = task.id, "task created");
        Ok(task)
    }

    /// List the user's tasks, newest first.
    pub async fn list(&self, user_id: UserId) -> TaskResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, description, completed, created_at, updated_at
             FROM tasks WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await?;
        Ok(tasks)
    }

    /// Fetch one of the user's tasks by id.
    pub async fn get(&self, user_id: UserId, task_id: TaskId) -> TaskResult<Task> {
        sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, description, completed, created_at, updated_at
             FROM tasks WHERE id = ?1 AND user_id = ?2",
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(TaskError::NotFound)
    }

    /// Apply a partial update to one of the user's tasks.
    ///
    /// Only the fields present in `update` change; `updated_at` is
    /// bumped either way.
    pub async fn update(
        &self,
        user_id: UserId,
        task_id: TaskId,
        update: TaskUpdate,
    ) -> TaskResult<Task> {
        if let Some(title) = &update.title
            && title.trim().is_empty()
        {
            return Err(TaskError::MissingTitle);
        }

        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET
                title = COALESCE(?1, title),
                description = COALESCE(?2, description),
                completed = COALESCE(?3, completed),
                updated_at = ?4
             WHERE id = ?5 AND user_id = ?6
             RETURNING id, user_id, title, description, completed, created_at, updated_at",
        )
        .bind(update.title.as_deref().map(str::trim))
        .bind(update.description)
        .bind(update.completed)
        .bind(Utc::now())
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(TaskError::NotFound)?;

        info!(user_id, task_id, "task updated");
        Ok(task)
    }

    /// Flip the completion flag on one of the user's tasks.
    pub async fn toggle(&self, user_id: UserId, task_id: TaskId) -> TaskResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET completed = NOT completed, updated_at = ?1
             WHERE id = ?2 AND user_id = ?3
             RETURNING id, user_id, title, description, completed, created_at, updated_at",
        )
        .bind(Utc::now())
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(TaskError::NotFound)?;

        info!(user_id, task_id, completed = task.completed, "task toggled");
        Ok(task)
    }

    /// Delete one of the user's tasks.
    pub async fn delete(&self, user_id: UserId, task_id: TaskId) -> TaskResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1 AND user_id = ?2")
            .bind(task_id)
            .bind(user_id)
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound);
        }
        info!(user_id, task_id, "task deleted");
        Ok(())
    }
}
