use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A note attached to a task
/// Maps to `comments` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub task_id: i64,
    pub content: String,
    pub created_date: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub task_id: i64,
    pub content: String,
    pub created_by: String,
}

impl Comment {
    pub async fn create(pool: &SqlitePool, new_comment: NewComment) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (task_id, content, created_date, created_by)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, task_id, content, created_date, created_by
            "#,
        )
        .bind(new_comment.task_id)
        .bind(new_comment.content)
        .bind(Utc::now())
        .bind(new_comment.created_by)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "SELECT id, task_id, content, created_date, created_by FROM comments WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Comments on a task, newest first
    pub async fn list_by_task(pool: &SqlitePool, task_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, task_id, content, created_date, created_by
            FROM comments
            WHERE task_id = ?1
            ORDER BY created_date DESC, id DESC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update_content(
        pool: &SqlitePool,
        id: i64,
        content: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE comments SET content = ?2 WHERE id = ?1")
            .bind(id)
            .bind(content)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
