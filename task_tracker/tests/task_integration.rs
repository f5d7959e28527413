//! Integration tests for ownership-scoped task CRUD.

use std::sync::Arc;
use task_tracker::auth::{AuthManager, TokenService, UserId};
use task_tracker::db::{Database, DatabaseConfig};
use task_tracker::task::{TaskError, TaskManager, TaskUpdate};

/// Helper to create a task manager plus two registered users
async fn setup() -> (TaskManager, UserId, UserId) {
    let db = Database::new(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    let pool = Arc::new(db.pool().clone());

    let tokens = TokenService::new(
        "task_test_access_secret_0123456789ab".to_string(),
        "task_test_refresh_secret_0123456789a".to_string(),
    );
    let auth = AuthManager::new(Arc::clone(&pool), tokens);
    let alice = auth
        .register("alice@example.com", "secret123")
        .await
        .expect("Registration should succeed")
        .user
        .id;
    let bob = auth
        .register("bob@example.com", "secret456")
        .await
        .expect("Registration should succeed")
        .user
        .id;

    (TaskManager::new(pool), alice, bob)
}

#[tokio::test]
async fn test_create_and_get_task() {
    let (tasks, alice, _) = setup().await;

    let created = tasks
        .create(alice, "Write report", "Quarterly numbers")
        .await
        .expect("Create should succeed");
    assert_eq!(created.title, "Write report");
    assert!(!created.completed);

    let fetched = tasks
        .get(alice, created.id)
        .await
        .expect("Get should succeed");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.description, "Quarterly numbers");
}

#[tokio::test]
async fn test_create_requires_title() {
    let (tasks, alice, _) = setup().await;

    let result = tasks.create(alice, "   ", "no title here").await;
    assert!(matches!(result, Err(TaskError::MissingTitle)));
}

#[tokio::test]
async fn test_list_is_newest_first_and_scoped() {
    let (tasks, alice, bob) = setup().await;

    let first = tasks.create(alice, "first", "").await.unwrap();
    let second = tasks.create(alice, "second", "").await.unwrap();
    tasks.create(bob, "bob's task", "").await.unwrap();

    let listed = tasks.list(alice).await.expect("List should succeed");
    assert_eq!(listed.len(), 2, "Only alice's tasks should appear");
    assert_eq!(listed[0].id, second.id, "Newest task comes first");
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_cross_user_access_looks_like_not_found() {
    let (tasks, alice, bob) = setup().await;

    let task = tasks.create(alice, "private", "").await.unwrap();

    assert!(matches!(
        tasks.get(bob, task.id).await,
        Err(TaskError::NotFound)
    ));
    assert!(matches!(
        tasks.update(bob, task.id, TaskUpdate::default()).await,
        Err(TaskError::NotFound)
    ));
    assert!(matches!(
        tasks.toggle(bob, task.id).await,
        Err(TaskError::NotFound)
    ));
    assert!(matches!(
        tasks.delete(bob, task.id).await,
        Err(TaskError::NotFound)
    ));

    // And the task is untouched.
    let still_there = tasks.get(alice, task.id).await.unwrap();
    assert_eq!(still_there.title, "private");
    assert!(!still_there.completed);
}

#[tokio::test]
async fn test_partial_update() {
    let (tasks, alice, _) = setup().await;

    let task = tasks.create(alice, "original", "desc").await.unwrap();

    let updated = tasks
        .update(
            alice,
            task.id,
            TaskUpdate {
                title: Some("renamed".to_string()),
                ..TaskUpdate::default()
            },
        )
        .await
        .expect("Update should succeed");

    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.description, "desc", "Unset fields stay put");
    assert!(!updated.completed);
}

#[tokio::test]
async fn test_update_rejects_blank_title() {
    let (tasks, alice, _) = setup().await;

    let task = tasks.create(alice, "keep me", "").await.unwrap();
    let result = tasks
        .update(
            alice,
            task.id,
            TaskUpdate {
                title: Some("  ".to_string()),
                ..TaskUpdate::default()
            },
        )
        .await;
    assert!(matches!(result, Err(TaskError::MissingTitle)));
}

#[tokio::test]
async fn test_toggle_flips_completion() {
    let (tasks, alice, _) = setup().await;

    let task = tasks.create(alice, "flip me", "").await.unwrap();
    let toggled = tasks.toggle(alice, task.id).await.unwrap();
    assert!(toggled.completed);

    let toggled_back = tasks.toggle(alice, task.id).await.unwrap();
    assert!(!toggled_back.completed);
}

#[tokio::test]
async fn test_delete_removes_task() {
    let (tasks, alice, _) = setup().await;

    let task = tasks.create(alice, "doomed", "").await.unwrap();
    tasks
        .delete(alice, task.id)
        .await
        .expect("Delete should succeed");

    assert!(matches!(
        tasks.get(alice, task.id).await,
        Err(TaskError::NotFound)
    ));
    assert!(
        matches!(tasks.delete(alice, task.id).await, Err(TaskError::NotFound)),
        "Deleting twice reports NotFound"
    );
}
