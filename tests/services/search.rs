use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::common::{assigned_task, create_list, create_task, day, services, ASSIGNEE, OTHER, OWNER};
use todolist::error::TodoError;
use todolist::types::{PageRequest, PagedResult, TaskDto, TaskSearchQuery};

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

async fn backdate(pool: &SqlitePool, task_id: i64, created: DateTime<Utc>) {
    sqlx::query("UPDATE tasks SET created_date = ?1 WHERE id = ?2")
        .bind(created)
        .bind(task_id)
        .execute(pool)
        .await
        .expect("backdate task");
}

fn titles(page: &PagedResult<TaskDto>) -> Vec<&str> {
    page.items.iter().map(|t| t.title.as_str()).collect()
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_text_search_matches_title_and_description(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Home").await;
    create_task(&services, list.id, OWNER, "Buy MILK", None).await;
    create_task(&services, list.id, OWNER, "Walk the dog", None).await;

    let page = services
        .search
        .search(OWNER, &TaskSearchQuery::new(" milk "))
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].title, "Buy MILK");

    let page = services
        .search
        .search(OWNER, &TaskSearchQuery::new("nothing like it"))
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
    assert!(page.items.is_empty());
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_date_range_matches_due_dates(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Work").await;
    create_task(&services, list.id, OWNER, "Mid January", Some(day(2025, 1, 15))).await;
    create_task(&services, list.id, OWNER, "Last day", Some(day(2025, 1, 31))).await;
    create_task(&services, list.id, OWNER, "February", Some(day(2025, 2, 1))).await;
    create_task(&services, list.id, OWNER, "Undated", None).await;

    // tasks are created today, so only the due dates fall in range
    let query = TaskSearchQuery {
        start_date: date(2025, 1, 1),
        end_date: date(2025, 1, 31),
        ..TaskSearchQuery::default()
    };
    let page = services.search.search(OWNER, &query).await.unwrap();
    let titles: Vec<&str> = page.items.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Mid January", "Last day"]);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_date_range_matches_created_dates(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Work").await;
    create_task(&services, list.id, OWNER, "LateDue", Some(day(2025, 1, 15))).await;
    let old = create_task(&services, list.id, OWNER, "OldCreated", None).await;
    create_task(&services, list.id, OWNER, "NowCreated", None).await;
    create_task(&services, list.id, OWNER, "February", Some(day(2025, 2, 1))).await;
    backdate(&pool, old.id, day(2025, 1, 10)).await;

    let query = TaskSearchQuery {
        start_date: date(2025, 1, 1),
        end_date: date(2025, 1, 31),
        ..TaskSearchQuery::default()
    };
    let page = services.search.search(OWNER, &query).await.unwrap();
    assert_eq!(titles(&page), vec!["LateDue", "OldCreated"]);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_open_ended_range_from_start_date(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Work").await;
    let late = create_task(&services, list.id, OWNER, "LateDue", Some(day(2025, 3, 1))).await;
    let early = create_task(&services, list.id, OWNER, "EarlyDue", Some(day(2025, 1, 5))).await;
    let old = create_task(&services, list.id, OWNER, "OldCreated", None).await;
    create_task(&services, list.id, OWNER, "NowCreated", None).await;
    for task_id in [late.id, early.id] {
        backdate(&pool, task_id, day(2025, 1, 1)).await;
    }
    backdate(&pool, old.id, day(2025, 1, 10)).await;

    let query = TaskSearchQuery {
        start_date: date(2025, 1, 20),
        ..TaskSearchQuery::default()
    };
    let page = services.search.search(OWNER, &query).await.unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(titles(&page), vec!["LateDue", "NowCreated"]);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_search_scope(pool: SqlitePool) {
    let services = services(&pool);
    assigned_task(&services, "Shared report").await;
    let other_list = create_list(&services, OTHER, "Private").await;
    create_task(&services, other_list.id, OTHER, "Private report", None).await;

    let query = TaskSearchQuery::new("report");
    assert_eq!(services.search.search(OWNER, &query).await.unwrap().total_count, 1);
    assert_eq!(services.search.search(ASSIGNEE, &query).await.unwrap().total_count, 1);

    let page = services.search.search(OTHER, &query).await.unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].title, "Private report");
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_search_paging(pool: SqlitePool) {
    let services = services(&pool);
    let list = create_list(&services, OWNER, "Many").await;
    for i in 1..=5 {
        create_task(&services, list.id, OWNER, &format!("Item {i}"), None).await;
    }

    let query = TaskSearchQuery {
        text: Some("item".to_string()),
        page: PageRequest::new(2, 2),
        ..TaskSearchQuery::default()
    };
    let page = services.search.search(OWNER, &query).await.unwrap();
    assert_eq!(page.total_count, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
}

#[sqlx::test(migrator = "todolist::database::MIGRATOR")]
async fn test_inverted_range_rejected(pool: SqlitePool) {
    let services = services(&pool);
    let query = TaskSearchQuery {
        start_date: date(2025, 2, 1),
        end_date: date(2025, 1, 1),
        ..TaskSearchQuery::default()
    };
    let err = services.search.search(OWNER, &query).await.unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)), "{err:?}");
}
