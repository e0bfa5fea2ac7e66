//! Ownership and assignment checks shared by the database services.
//!
//! A list's owner controls the list and all of its tasks. A task's assignee
//! may read it, comment on it and move its status, nothing else.

use sqlx::SqlitePool;
use tracing::warn;

use crate::error::{TodoError, TodoResult};
use crate::models::Task;

pub(crate) fn ensure_positive_id(id: i64, what: &str) -> TodoResult<()> {
    if id <= 0 {
        return Err(TodoError::validation(format!(
            "{what} id must be a positive integer"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_user_id(user_id: &str) -> TodoResult<()> {
    if user_id.trim().is_empty() {
        return Err(TodoError::validation("User id must not be empty"));
    }
    Ok(())
}

/// A task together with the owner of its list
#[derive(Debug, Clone)]
pub(crate) struct TaskAccess {
    pub task: Task,
    pub owner_id: String,
}

impl TaskAccess {
    /// Load the task or fail with NotFound
    pub async fn load(pool: &SqlitePool, task_id: i64) -> TodoResult<Self> {
        ensure_positive_id(task_id, "Task")?;

        let task = Task::find_by_id(pool, task_id)
            .await?
            .ok_or_else(|| TodoError::not_found(format!("Task with ID {task_id} not found")))?;
        let owner_id = Task::owner_of(pool, task_id)
            .await?
            .ok_or_else(|| TodoError::not_found(format!("Task with ID {task_id} not found")))?;

        Ok(Self { task, owner_id })
    }

    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    pub fn is_assignee(&self, user_id: &str) -> bool {
        self.task.assigned_to_user_id.as_deref() == Some(user_id)
    }

    pub fn require_owner(&self, user_id: &str, action: &str) -> TodoResult<()> {
        if self.is_owner(user_id) {
            return Ok(());
        }
        warn!(
            task_id = self.task.id,
            user_id = %user_id,
            action = action,
            "Rejected non-owner access to task"
        );
        Err(TodoError::forbidden(format!(
            "Only the list owner can {action}"
        )))
    }

    pub fn require_owner_or_assignee(&self, user_id: &str, action: &str) -> TodoResult<()> {
        if self.is_owner(user_id) || self.is_assignee(user_id) {
            return Ok(());
        }
        warn!(
            task_id = self.task.id,
            user_id = %user_id,
            action = action,
            "Rejected access by user who neither owns nor is assigned the task"
        );
        Err(TodoError::forbidden(format!(
            "You don't have permission to {action}"
        )))
    }
}
