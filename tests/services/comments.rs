use sqlx::SqlitePool;

use crate::common::{assigned_task, services, ASSIGNEE, OTHER, OWNER};
use todolist::error::TodoError;

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_assignee_comments_but_cannot_edit(pool: SqlitePool) {
    let services = services(&pool);
    let task = assigned_task(&services, "Review").await;

    let comment = services
        .comments
        .add(task.id, "  Looks good  ", ASSIGNEE)
        .await
        .unwrap();
    assert_eq!(comment.content, "Looks good");
    assert_eq!(comment.created_by, ASSIGNEE);

    let err = services
        .comments
        .update(comment.id, "Edited", ASSIGNEE)
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    let err = services.comments.delete(comment.id, ASSIGNEE).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_owner_manages_comments(pool: SqlitePool) {
    let services = services(&pool);
    let task = assigned_task(&services, "Review").await;
    let comment = services.comments.add(task.id, "First", ASSIGNEE).await.unwrap();

    services.comments.update(comment.id, "First (edited)", OWNER).await.unwrap();
    let comments = services.comments.get_by_task(task.id, ASSIGNEE).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "First (edited)");
    assert_eq!(comments[0].created_date, comment.created_date);

    services.comments.delete(comment.id, OWNER).await.unwrap();
    assert!(services.comments.get_by_task(task.id, OWNER).await.unwrap().is_empty());
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_strangers_cannot_read_or_add(pool: SqlitePool) {
    let services = services(&pool);
    let task = assigned_task(&services, "Review").await;

    let err = services.comments.get_by_task(task.id, OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");
    let err = services.comments.add(task.id, "hi", OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_comment_content_rules(pool: SqlitePool) {
    let services = services(&pool);
    let task = assigned_task(&services, "Review").await;

    let err = services.comments.add(task.id, "   ", OWNER).await.unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)), "{err:?}");
    let err = services
        .comments
        .add(task.id, &"c".repeat(2001), OWNER)
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)), "{err:?}");
    assert!(services.comments.add(task.id, &"c".repeat(2000), OWNER).await.is_ok());

    let err = services.comments.update(999, "x", OWNER).await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)), "{err:?}");
}
