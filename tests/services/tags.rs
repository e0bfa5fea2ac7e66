use sqlx::SqlitePool;

use crate::common::{assigned_task, create_list, create_task, services, ASSIGNEE, OTHER, OWNER};
use todolist::error::TodoError;

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_tag_names_are_case_insensitive(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Office").await;
    let first = create_task(&services, list.id, OWNER, "Report", None).await;
    let second = create_task(&services, list.id, OWNER, "Slides", None).await;

    let a = services.tags.add_to_task(first.id, "Work", OWNER).await.unwrap();
    let b = services.tags.add_to_task(second.id, "work", OWNER).await.unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(b.task_count, 2);

    let all = services.tags.get_all(OWNER).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].task_count, 2);

    let tagged = services.tags.get_tasks_by_tag(a.id, OWNER).await.unwrap();
    let mut ids: Vec<i64> = tagged.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_adding_same_tag_twice_is_idempotent(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Office").await;
    let task = create_task(&services, list.id, OWNER, "Report", None).await;

    services.tags.add_to_task(task.id, "urgent", OWNER).await.unwrap();
    services.tags.add_to_task(task.id, "URGENT", OWNER).await.unwrap();
    let tags = services.tags.get_by_task(task.id, OWNER).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "urgent");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_remove_tag(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Office").await;
    let task = create_task(&services, list.id, OWNER, "Report", None).await;
    let tag = services.tags.add_to_task(task.id, "urgent", OWNER).await.unwrap();

    let err = services
        .tags
        .remove_from_task(task.id, tag.id, OTHER)
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    services.tags.remove_from_task(task.id, tag.id, OWNER).await.unwrap();
    assert!(services.tags.get_by_task(task.id, OWNER).await.unwrap().is_empty());
    assert!(services.tags.get_all(OWNER).await.unwrap().is_empty());
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_tag_visibility_follows_task_access(pool: SqlitePool) {
    let services = services(&pool);
    let task = assigned_task(&services, "Review").await;
    services.tags.add_to_task(task.id, "team", OWNER).await.unwrap();

    // assignee sees the tag but cannot change tags
    assert_eq!(services.tags.get_by_task(task.id, ASSIGNEE).await.unwrap().len(), 1);
    assert_eq!(services.tags.get_all(ASSIGNEE).await.unwrap().len(), 1);
    let err = services
        .tags
        .add_to_task(task.id, "mine", ASSIGNEE)
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    // strangers see nothing
    let err = services.tags.get_by_task(task.id, OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");
    assert!(services.tags.get_all(OTHER).await.unwrap().is_empty());
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_blank_tag_rejected(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Office").await;
    let task = create_task(&services, list.id, OWNER, "Report", None).await;
    let err = services.tags.add_to_task(task.id, "   ", OWNER).await.unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)), "{err:?}");
}
