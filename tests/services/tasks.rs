use sqlx::SqlitePool;

use crate::common::{create_list, create_task, day, services, OTHER, OWNER};
use todolist::error::TodoError;
use todolist::models::{TaskPriority, TaskStatus};
use todolist::types::{CreateTaskRequest, UpdateTaskRequest};

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_new_task_defaults(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;
    let task = create_task(&services, list.id, OWNER, "  Milk ", None).await;

    assert_eq!(task.title, "Milk");
    assert_eq!(task.status, TaskStatus::NotStarted);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert!(!task.is_completed);
    assert!(task.completed_date.is_none());
    assert_eq!(task.todo_list_id, list.id);
    assert_eq!(task.assigned_to_user_id.as_deref(), Some(OWNER));
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_create_with_requested_status(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;
    let request = |title: &str, status| CreateTaskRequest {
        title: title.into(),
        description: None,
        due_date: None,
        priority: TaskPriority::High,
        status,
    };

    let started = services
        .tasks
        .create(list.id, request("Bread", TaskStatus::InProgress), OWNER)
        .await
        .unwrap();
    assert_eq!(started.status, TaskStatus::InProgress);
    assert!(!started.is_completed);
    assert!(started.completed_date.is_none());

    let done = services
        .tasks
        .create(list.id, request("Eggs", TaskStatus::Completed), OWNER)
        .await
        .unwrap();
    assert_eq!(done.status, TaskStatus::Completed);
    assert!(done.is_completed);
    assert_eq!(done.completed_date, Some(done.created_date));

    let stored = services.tasks.get_by_id(done.id, OWNER).await.unwrap();
    assert!(stored.is_completed);
    assert!(stored.completed_date.is_some());
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_create_in_foreign_or_missing_list(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;
    let request = || CreateTaskRequest {
        title: "Sneaky".into(),
        description: None,
        due_date: None,
        priority: TaskPriority::Low,
        status: TaskStatus::NotStarted,
    };

    let err = services.tasks.create(list.id, request(), OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    let err = services.tasks.create(9999, request(), OWNER).await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)), "{err:?}");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_toggle_twice_restores_completion_but_keeps_status(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;
    let task = create_task(&services, list.id, OWNER, "Milk", None).await;

    let done = services.tasks.toggle_completion(task.id, OWNER).await.unwrap();
    assert!(done.is_completed);
    assert!(done.completed_date.is_some());
    assert_eq!(done.status, TaskStatus::Completed);

    let undone = services.tasks.toggle_completion(task.id, OWNER).await.unwrap();
    assert_eq!(undone.is_completed, task.is_completed);
    assert_eq!(undone.completed_date, task.completed_date);
    assert_eq!(undone.status, TaskStatus::Completed);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_update_keeps_creation_and_completion(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;
    let task = create_task(&services, list.id, OWNER, "Milk", None).await;
    let done = services.tasks.toggle_completion(task.id, OWNER).await.unwrap();

    services
        .tasks
        .update(
            UpdateTaskRequest {
                id: task.id,
                title: "Oat milk".into(),
                description: Some("2 litres".into()),
                priority: TaskPriority::High,
                status: TaskStatus::InProgress,
                due_date: Some(day(2025, 1, 1)),
            },
            OWNER,
        )
        .await
        .unwrap();

    let updated = services.tasks.get_by_id(task.id, OWNER).await.unwrap();
    assert_eq!(updated.title, "Oat milk");
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.due_date, Some(day(2025, 1, 1)));
    assert_eq!(updated.created_date, task.created_date);
    assert!(updated.is_completed);
    assert_eq!(updated.completed_date, done.completed_date);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_non_owner_cannot_touch_task(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;
    let task = create_task(&services, list.id, OWNER, "Milk", None).await;

    let err = services.tasks.get_by_id(task.id, OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");
    let err = services.tasks.toggle_completion(task.id, OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");
    let err = services.tasks.delete(task.id, OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");
    let err = services.tasks.get_by_list(list.id, OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    let err = services.tasks.get_by_id(424242, OWNER).await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)), "{err:?}");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_title_limits(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;
    let err = services
        .tasks
        .create(
            list.id,
            CreateTaskRequest {
                title: "x".repeat(201),
                description: None,
                due_date: None,
                priority: TaskPriority::Low,
                status: TaskStatus::NotStarted,
            },
            OWNER,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)), "{err:?}");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_delete_task(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;
    let keep = create_task(&services, list.id, OWNER, "Keep", None).await;
    let drop = create_task(&services, list.id, OWNER, "Drop", None).await;

    services.tasks.delete(drop.id, OWNER).await.unwrap();
    let remaining = services.tasks.get_by_list(list.id, OWNER).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);
}
