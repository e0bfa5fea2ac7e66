use sqlx::SqlitePool;

use crate::common::{assigned_task, create_list, create_task, day, services, ASSIGNEE, OTHER, OWNER};
use todolist::error::TodoError;
use todolist::models::TaskStatus;
use todolist::types::{AssignedTaskSort, AssignedTasksQuery, PageRequest};

fn query(sort_by: AssignedTaskSort, status: Option<TaskStatus>) -> AssignedTasksQuery {
    AssignedTasksQuery {
        status,
        sort_by,
        page: PageRequest::new(1, 10),
    }
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_dated_task_sorts_before_undated(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Mixed").await;
    let undated = create_task(&services, list.id, OWNER, "Someday", None).await;
    let dated = create_task(&services, list.id, OWNER, "New year", Some(day(2025, 1, 1))).await;

    let page = services
        .assigned_tasks
        .get_assigned(OWNER, &query(AssignedTaskSort::DueDate, None))
        .await
        .unwrap();
    let ids: Vec<i64> = page.items.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![dated.id, undated.id]);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_default_view_hides_completed(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Mixed").await;
    let open = create_task(&services, list.id, OWNER, "Open", None).await;
    let done = create_task(&services, list.id, OWNER, "Done", None).await;
    services.tasks.toggle_completion(done.id, OWNER).await.unwrap();

    let page = services
        .assigned_tasks
        .get_assigned(OWNER, &query(AssignedTaskSort::Name, None))
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, open.id);

    let completed = services
        .assigned_tasks
        .get_assigned(OWNER, &query(AssignedTaskSort::Name, Some(TaskStatus::Completed)))
        .await
        .unwrap();
    assert_eq!(completed.total_count, 1);
    assert_eq!(completed.items[0].id, done.id);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_paging_over_assigned(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Many").await;
    for n in 0..7 {
        create_task(&services, list.id, OWNER, &format!("Task {n}"), None).await;
    }
    let mut q = query(AssignedTaskSort::Name, None);
    q.page = PageRequest::new(2, 3);
    let page = services.assigned_tasks.get_assigned(OWNER, &q).await.unwrap();
    assert_eq!(page.total_count, 7);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items[0].title, "Task 3");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_only_assignee_changes_status(pool: SqlitePool) {
    let services = services(&pool);
    let task = assigned_task(&services, "Review").await;

    let err = services
        .assigned_tasks
        .change_status(task.id, TaskStatus::InProgress, OWNER)
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    services
        .assigned_tasks
        .change_status(task.id, TaskStatus::Completed, ASSIGNEE)
        .await
        .unwrap();
    let updated = services.tasks.get_by_id(task.id, OWNER).await.unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);
    assert!(updated.is_completed);
    assert!(updated.completed_date.is_some());

    services
        .assigned_tasks
        .change_status(task.id, TaskStatus::InProgress, ASSIGNEE)
        .await
        .unwrap();
    let reopened = services.tasks.get_by_id(task.id, OWNER).await.unwrap();
    assert!(!reopened.is_completed);
    assert!(reopened.completed_date.is_none());
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_only_owner_assigns(pool: SqlitePool) {
    let services = services(&pool);
    let task = assigned_task(&services, "Review").await;

    let err = services
        .assigned_tasks
        .assign(task.id, OTHER, ASSIGNEE)
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Authorization(_)), "{err:?}");

    let err = services
        .assigned_tasks
        .assign(task.id, "   ", OWNER)
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)), "{err:?}");

    let page = services
        .assigned_tasks
        .get_assigned(ASSIGNEE, &AssignedTasksQuery::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, task.id);
}
