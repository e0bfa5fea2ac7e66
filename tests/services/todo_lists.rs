use sqlx::SqlitePool;

use crate::common::{create_list, create_task, services, OTHER, OWNER};
use todolist::services::Services;
use todolist::error::TodoError;
use todolist::types::{PageRequest, UpdateTodoListRequest};

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_groceries_visible_only_to_owner(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;

    let found = services.todo_lists.get_by_id(list.id, OWNER).await.unwrap();
    assert_eq!(found.map(|l| l.title), Some("Groceries".to_string()));

    let hidden = services.todo_lists.get_by_id(list.id, OTHER).await.unwrap();
    assert!(hidden.is_none());
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_non_owner_update_and_delete_are_refused(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Groceries").await;

    let update = UpdateTodoListRequest {
        id: list.id,
        title: "Mine now".into(),
        description: None,
    };
    let err = services.todo_lists.update(update, OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    let err = services.todo_lists.delete(list.id, OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    let err = services.todo_lists.get_tasks(list.id, OTHER).await.unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    // untouched
    let list = services.todo_lists.get_by_id(list.id, OWNER).await.unwrap().unwrap();
    assert_eq!(list.title, "Groceries");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_paging_counts_and_task_counts(pool: SqlitePool) {
    let services = services(&pool);
    for n in 0..5 {
        create_list(&services, OWNER, &format!("List {n}")).await;
    }
    create_list(&services, OTHER, "Not mine").await;

    let first = services
        .todo_lists
        .get_paged(OWNER, PageRequest::new(1, 2))
        .await
        .unwrap();
    assert_eq!(first.total_count, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items.len(), 2);
    assert!(first.has_next_page && !first.has_previous_page);
    // newest first
    assert_eq!(first.items[0].title, "List 4");

    let last = services
        .todo_lists
        .get_paged(OWNER, PageRequest::new(3, 2))
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert!(!last.has_next_page);

    let list = &first.items[0];
    create_task(&services, list.id, OWNER, "a", None).await;
    create_task(&services, list.id, OWNER, "b", None).await;
    let refreshed = services.todo_lists.get_by_id(list.id, OWNER).await.unwrap().unwrap();
    assert_eq!(refreshed.task_count, 2);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_empty_owner_has_zero_pages(pool: SqlitePool) {
    let services = services(&pool);
    let page = services
        .todo_lists
        .get_paged(OWNER, PageRequest::new(1, 20))
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.items.is_empty());
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_invalid_page_is_validation_error(pool: SqlitePool) {
    let services = services(&pool);
    let err = services
        .todo_lists
        .get_paged(OWNER, PageRequest::new(0, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)));
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_owner_update_and_delete(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Chores").await;
    let task = create_task(&services, list.id, OWNER, "Vacuum", None).await;

    services
        .todo_lists
        .update(
            UpdateTodoListRequest {
                id: list.id,
                title: "  House chores ".into(),
                description: Some("weekly".into()),
            },
            OWNER,
        )
        .await
        .unwrap();
    let updated = services.todo_lists.get_by_id(list.id, OWNER).await.unwrap().unwrap();
    assert_eq!(updated.title, "House chores");
    assert_eq!(updated.description.as_deref(), Some("weekly"));
    assert_eq!(updated.created_date, list.created_date);

    assert!(services.todo_lists.is_owner(list.id, OWNER).await.unwrap());
    assert!(!services.todo_lists.is_owner(list.id, OTHER).await.unwrap());

    services.todo_lists.delete(list.id, OWNER).await.unwrap();
    assert!(services.todo_lists.get_by_id(list.id, OWNER).await.unwrap().is_none());
    // tasks go with the list
    let err = services.tasks.get_by_id(task.id, OWNER).await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)), "{err:?}");
}

async fn row_count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows")
}

async fn seed_tagged_task(services: &Services) -> (i64, i64) {
    let list = create_list(services, OWNER, "Groceries").await;
    let task = create_task(services, list.id, OWNER, "Milk", None).await;
    services.comments.add(task.id, "semi-skimmed", OWNER).await.unwrap();
    services.tags.add_to_task(task.id, "dairy", OWNER).await.unwrap();
    (list.id, task.id)
}

async fn assert_task_rows_gone(pool: &SqlitePool, services: &Services) {
    for table in ["tasks", "comments", "task_tags"] {
        assert_eq!(row_count(pool, table).await, 0, "{table} should be empty");
    }
    assert!(services.tags.get_all(OWNER).await.unwrap().is_empty());
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_deleting_list_removes_tasks_comments_and_tag_links(pool: SqlitePool) {
    let services = services(&pool);
    let (list_id, _) = seed_tagged_task(&services).await;
    assert_eq!(row_count(&pool, "task_tags").await, 1);

    services.todo_lists.delete(list_id, OWNER).await.unwrap();
    assert_task_rows_gone(&pool, &services).await;
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_deleting_task_removes_comments_and_tag_links(pool: SqlitePool) {
    let services = services(&pool);
    let (list_id, task_id) = seed_tagged_task(&services).await;
    assert_eq!(row_count(&pool, "comments").await, 1);

    services.tasks.delete(task_id, OWNER).await.unwrap();
    assert_task_rows_gone(&pool, &services).await;
    assert_eq!(row_count(&pool, "todo_lists").await, 1);
    assert!(services.todo_lists.get_by_id(list_id, OWNER).await.unwrap().is_some());
}
