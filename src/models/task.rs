use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use std::str::FromStr;

use crate::error::TodoError;

/// Workflow state of a task, stored as INTEGER
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
pub enum TaskStatus {
    #[default]
    NotStarted = 0,
    InProgress = 1,
    Completed = 2,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notstarted" | "not_started" | "0" => Ok(Self::NotStarted),
            "inprogress" | "in_progress" | "1" => Ok(Self::InProgress),
            "completed" | "2" => Ok(Self::Completed),
            other => Err(TodoError::validation(format!("Unknown task status '{other}'"))),
        }
    }
}

/// Task priority, stored as INTEGER (higher is more urgent)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
pub enum TaskPriority {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "0" => Ok(Self::Low),
            "medium" | "1" => Ok(Self::Medium),
            "high" | "2" => Ok(Self::High),
            other => Err(TodoError::validation(format!("Unknown task priority '{other}'"))),
        }
    }
}

/// A unit of work inside a todo list
/// Maps to `tasks` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub todo_list_id: i64,
    pub assigned_to_user_id: Option<String>,
}

/// New Task for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub todo_list_id: i64,
    pub assigned_to_user_id: Option<String>,
}

/// Owner-editable fields; creation and completion stamps are never touched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
}

/// Sort order for the assigned-task listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignedTaskOrder {
    Title,
    #[default]
    DueDate,
    PriorityDesc,
    Status,
}

impl AssignedTaskOrder {
    fn order_by(&self) -> &'static str {
        match self {
            Self::Title => "t.title COLLATE NOCASE ASC, t.id ASC",
            Self::DueDate => "(t.due_date IS NULL) ASC, t.due_date ASC, t.id ASC",
            Self::PriorityDesc => "t.priority DESC, t.id ASC",
            Self::Status => "t.status ASC, t.id ASC",
        }
    }
}

/// Filter for tasks assigned to one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedTaskFilter<'a> {
    pub assignee_id: &'a str,
    /// `None` means every status except Completed
    pub status: Option<TaskStatus>,
    pub order: AssignedTaskOrder,
}

/// Filter for the owner-or-assignee task search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSearchFilter<'a> {
    pub user_id: &'a str,
    pub text: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

const TASK_COLUMNS: &str = "t.id, t.title, t.description, t.created_date, t.due_date, \
     t.completed_date, t.is_completed, t.status, t.priority, t.todo_list_id, t.assigned_to_user_id";

const ASSIGNED_WHERE: &str = "t.assigned_to_user_id = ?1 \
     AND ((?2 IS NULL AND t.status <> 2) OR t.status = ?2)";

const SEARCH_WHERE: &str = r#"(l.owner_id = ?1 OR t.assigned_to_user_id = ?1)
      AND (?2 IS NULL
           OR lower(t.title) LIKE ?2 ESCAPE '\'
           OR lower(COALESCE(t.description, '')) LIKE ?2 ESCAPE '\')
      AND ((?3 IS NULL AND ?4 IS NULL)
           OR ((?3 IS NULL OR date(t.created_date) >= ?3)
               AND (?4 IS NULL OR date(t.created_date) <= ?4))
           OR (t.due_date IS NOT NULL
               AND (?3 IS NULL OR date(t.due_date) >= ?3)
               AND (?4 IS NULL OR date(t.due_date) <= ?4)))"#;

impl Task {
    /// Create a task stamping the creation time; a Completed status also stamps completion
    pub async fn create(pool: &SqlitePool, new_task: NewTask) -> Result<Task, sqlx::Error> {
        let now = Utc::now();
        let completed = new_task.status == TaskStatus::Completed;
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, created_date, due_date, completed_date,
                               is_completed, status, priority, todo_list_id, assigned_to_user_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            RETURNING id, title, description, created_date, due_date, completed_date,
                      is_completed, status, priority, todo_list_id, assigned_to_user_id
            "#,
        )
        .bind(new_task.title)
        .bind(new_task.description)
        .bind(now)
        .bind(new_task.due_date)
        .bind(completed.then_some(now))
        .bind(completed)
        .bind(new_task.status)
        .bind(new_task.priority)
        .bind(new_task.todo_list_id)
        .bind(new_task.assigned_to_user_id)
        .fetch_one(pool)
            .await
    }

    /// Tasks of one list in creation order
    pub async fn list_by_todo_list(
        pool: &SqlitePool,
        todo_list_id: i64,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks t \
             WHERE t.todo_list_id = ?1 \
             ORDER BY t.created_date ASC, t.id ASC"
        ))
        .bind(todo_list_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = ?2, description = ?3, priority = ?4, status = ?5, due_date = ?6
            WHERE id = ?1
            RETURNING id, title, description, created_date, due_date, completed_date,
                      is_completed, status, priority, todo_list_id, assigned_to_user_id
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.priority)
        .bind(update.status)
        .bind(update.due_date)
        .fetch_optional(pool)
        .await
    }

    /// Delete a task; comments and tag links cascade
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Persist completion flag, completion stamp and status together
    pub async fn set_completion(
        pool: &SqlitePool,
        id: i64,
        is_completed: bool,
        completed_date: Option<DateTime<Utc>>,
        status: TaskStatus,
    ) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET is_completed = ?2, completed_date = ?3, status = ?4
            WHERE id = ?1
            RETURNING id, title, description, created_date, due_date, completed_date,
                      is_completed, status, priority, todo_list_id, assigned_to_user_id
            "#,
        )
        .bind(id)
        .bind(is_completed)
        .bind(completed_date)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    pub async fn set_assignee(
        pool: &SqlitePool,
        id: i64,
        assignee_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET assigned_to_user_id = ?2 WHERE id = ?1")
            .bind(id)
            .bind(assignee_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Owner id of the list containing the task, if the task exists
    pub async fn owner_of(pool: &SqlitePool, id: i64) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT l.owner_id
            FROM tasks t
            JOIN todo_lists l ON l.id = t.todo_list_id
            WHERE t.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn count_assigned(
        pool: &SqlitePool,
        filter: &AssignedTaskFilter<'_>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM tasks t WHERE {ASSIGNED_WHERE}"
        ))
        .bind(filter.assignee_id)
        .bind(filter.status)
        .fetch_one(pool)
        .await
    }

    /// One page of tasks assigned to a user, ordered by `filter.order`
    pub async fn list_assigned(
        pool: &SqlitePool,
        filter: &AssignedTaskFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks t \
             WHERE {ASSIGNED_WHERE} \
             ORDER BY {} \
             LIMIT ?3 OFFSET ?4",
            filter.order.order_by()
        ))
        .bind(filter.assignee_id)
        .bind(filter.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count_search(
        pool: &SqlitePool,
        filter: &TaskSearchFilter<'_>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM tasks t \
             JOIN todo_lists l ON l.id = t.todo_list_id \
             WHERE {SEARCH_WHERE}"
        ))
        .bind(filter.user_id)
        .bind(filter.text.map(like_pattern))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_one(pool)
        .await
    }

    /// One page of matching tasks, due date first (undated last) then title
    pub async fn search(
        pool: &SqlitePool,
        filter: &TaskSearchFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks t \
             JOIN todo_lists l ON l.id = t.todo_list_id \
             WHERE {SEARCH_WHERE} \
             ORDER BY (t.due_date IS NULL) ASC, t.due_date ASC, t.title COLLATE NOCASE ASC, t.id ASC \
             LIMIT ?5 OFFSET ?6"
        ))
        .bind(filter.user_id)
        .bind(filter.text.map(like_pattern))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Tasks carrying `tag_id` that `user_id` owns or is assigned to
    pub async fn list_by_tag_for_user(
        pool: &SqlitePool,
        tag_id: i64,
        user_id: &str,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks t \
             JOIN todo_lists l ON l.id = t.todo_list_id \
             JOIN task_tags tt ON tt.task_id = t.id \
             WHERE tt.tag_id = ?1 AND (l.owner_id = ?2 OR t.assigned_to_user_id = ?2) \
             ORDER BY t.created_date ASC, t.id ASC"
        ))
        .bind(tag_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}

/// Lower-cased `%term%` with LIKE wildcards escaped
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
