use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A named collection of tasks owned by one user
/// Maps to `todo_lists` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TodoList {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub owner_id: String,
}

/// New TodoList for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodoList {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: String,
}

/// TodoList row joined with the number of tasks it contains
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TodoListWithCount {
    #[sqlx(flatten)]
    pub list: TodoList,
    pub task_count: i64,
}

impl TodoList {
    /// Create a new list, stamping the creation time
    pub async fn create(pool: &SqlitePool, new_list: NewTodoList) -> Result<TodoList, sqlx::Error> {
        sqlx::query_as::<_, TodoList>(
            r#"
            INSERT INTO todo_lists (title, description, created_date, owner_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, title, description, created_date, owner_id
            "#,
        )
        .bind(new_list.title)
        .bind(new_list.description)
        .bind(Utc::now())
        .bind(new_list.owner_id)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<TodoList>, sqlx::Error> {
        sqlx::query_as::<_, TodoList>(
            r#"
            SELECT id, title, description, created_date, owner_id
            FROM todo_lists
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find one list with its task count
    pub async fn find_with_count(
        pool: &SqlitePool,
        id: i64,
    ) -> Result<Option<TodoListWithCount>, sqlx::Error> {
        sqlx::query_as::<_, TodoListWithCount>(
            r#"
            SELECT l.id, l.title, l.description, l.created_date, l.owner_id,
                   (SELECT COUNT(*) FROM tasks t WHERE t.todo_list_id = l.id) AS task_count
            FROM todo_lists l
            WHERE l.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All lists owned by `owner_id`, newest first, with task counts
    pub async fn list_by_owner_with_counts(
        pool: &SqlitePool,
        owner_id: &str,
    ) -> Result<Vec<TodoListWithCount>, sqlx::Error> {
        sqlx::query_as::<_, TodoListWithCount>(
            r#"
            SELECT l.id, l.title, l.description, l.created_date, l.owner_id,
                   (SELECT COUNT(*) FROM tasks t WHERE t.todo_list_id = l.id) AS task_count
            FROM todo_lists l
            WHERE l.owner_id = ?1
            ORDER BY l.created_date DESC, l.id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Update title and description; returns false when no row matched
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        title: &str,
        description: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE todo_lists
            SET title = ?2, description = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a list; tasks, comments and tag links cascade
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// True only when the list exists and belongs to `user_id`
    pub async fn is_owned_by(
        pool: &SqlitePool,
        id: i64,
        user_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM todo_lists WHERE id = ?1 AND owner_id = ?2")
                .bind(id)
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok(count > 0)
    }
}
