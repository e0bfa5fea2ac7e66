use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A label shared across tasks; names are stored trimmed and lower-cased
/// Maps to `tags` table, linked through `task_tags`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TagWithCount {
    pub id: i64,
    pub name: String,
    pub task_count: i64,
}

impl Tag {
    /// Canonical form used for storage and lookups
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE name = ?1")
            .bind(Self::normalize_name(name))
            .fetch_optional(pool)
            .await
    }

    /// Look up a tag by normalized name, inserting it when absent
    pub async fn get_or_create(pool: &SqlitePool, name: &str) -> Result<Tag, sqlx::Error> {
        let normalized = Self::normalize_name(name);

        sqlx::query("INSERT INTO tags (name) VALUES (?1) ON CONFLICT(name) DO NOTHING")
            .bind(&normalized)
            .execute(pool)
            .await?;

        Self::find_by_name(pool, &normalized)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Tags visible to `user_id`, with counts over that user's tasks only
    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: &str,
    ) -> Result<Vec<TagWithCount>, sqlx::Error> {
        sqlx::query_as::<_, TagWithCount>(
            r#"
            SELECT g.id, g.name, COUNT(DISTINCT t.id) AS task_count
            FROM tags g
            JOIN task_tags tt ON tt.tag_id = g.id
            JOIN tasks t ON t.id = tt.task_id
            JOIN todo_lists l ON l.id = t.todo_list_id
            WHERE l.owner_id = ?1 OR t.assigned_to_user_id = ?1
            GROUP BY g.id, g.name
            ORDER BY g.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Tags on one task; counts are scoped to `user_id` like [`Tag::list_for_user`]
    pub async fn list_for_task(
        pool: &SqlitePool,
        task_id: i64,
        user_id: &str,
    ) -> Result<Vec<TagWithCount>, sqlx::Error> {
        sqlx::query_as::<_, TagWithCount>(
            r#"
            SELECT g.id, g.name,
                   (SELECT COUNT(DISTINCT t.id)
                    FROM task_tags tt2
                    JOIN tasks t ON t.id = tt2.task_id
                    JOIN todo_lists l ON l.id = t.todo_list_id
                    WHERE tt2.tag_id = g.id
                      AND (l.owner_id = ?2 OR t.assigned_to_user_id = ?2)) AS task_count
            FROM tags g
            JOIN task_tags tt ON tt.tag_id = g.id
            WHERE tt.task_id = ?1
            ORDER BY g.name ASC
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Link a tag to a task; linking twice is a no-op
    pub async fn attach(pool: &SqlitePool, task_id: i64, tag_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?1, ?2)")
            .bind(task_id)
            .bind(tag_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Remove a link; returns false when the tag was not on the task
    pub async fn detach(pool: &SqlitePool, task_id: i64, tag_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_tags WHERE task_id = ?1 AND tag_id = ?2")
            .bind(task_id)
            .bind(tag_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(Tag::normalize_name("  Work "), "work");
        assert_eq!(Tag::normalize_name("URGENT"), "urgent");
    }
}
