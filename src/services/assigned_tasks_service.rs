//! # Assigned Tasks Service
//!
//! The assignee's view across every list: filter by status, sort, page.
//! Status changes belong to the assignee, reassignment to the list owner.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::authorization::{ensure_positive_id, ensure_user_id, TaskAccess};
use super::AssignedTasksService;
use crate::error::{TodoError, TodoResult};
use crate::models::task::AssignedTaskFilter;
use crate::models::{Task, TaskStatus};
use crate::types::{AssignedTasksQuery, PagedResult, TaskDto};

#[derive(Debug, Clone)]
pub struct DatabaseAssignedTasksService {
    pool: SqlitePool,
}

impl DatabaseAssignedTasksService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignedTasksService for DatabaseAssignedTasksService {
    async fn get_assigned(
        &self,
        user_id: &str,
        query: &AssignedTasksQuery,
    ) -> TodoResult<PagedResult<TaskDto>> {
        ensure_user_id(user_id)?;
        query.page.validate()?;

        let filter = AssignedTaskFilter {
            assignee_id: user_id,
            status: query.status,
            order: query.sort_by.order(),
        };

        let total_count = Task::count_assigned(&self.pool, &filter).await?;
        let tasks = Task::list_assigned(
            &self.pool,
            &filter,
            query.page.limit(),
            query.page.offset(),
        )
        .await?;

        debug!(
            user_id = %user_id,
            status = ?query.status,
            sort_by = %query.sort_by,
            total_count,
            "Loaded assigned tasks"
        );
        Ok(PagedResult::new(
            tasks.into_iter().map(TaskDto::from).collect(),
            total_count,
            query.page.page_number,
            query.page.page_size,
        ))
    }

    async fn change_status(
        &self,
        task_id: i64,
        status: TaskStatus,
        user_id: &str,
    ) -> TodoResult<()> {
        ensure_user_id(user_id)?;
        let access = TaskAccess::load(&self.pool, task_id).await?;
        if !access.is_assignee(user_id) {
            warn!(task_id, user_id = %user_id, "Rejected status change by non-assignee");
            return Err(TodoError::forbidden(
                "Only the assigned user can change the status of this task",
            ));
        }

        let (is_completed, completed_date) = if status == TaskStatus::Completed {
            (true, Some(Utc::now()))
        } else {
            (false, None)
        };
        Task::set_completion(&self.pool, task_id, is_completed, completed_date, status)
            .await?
            .ok_or_else(|| TodoError::not_found(format!("Task with ID {task_id} not found")))?;

        info!(task_id, user_id = %user_id, status = %status, "Changed task status");
        Ok(())
    }

    async fn assign(&self, task_id: i64, assignee_id: &str, user_id: &str) -> TodoResult<()> {
        ensure_user_id(user_id)?;
        ensure_positive_id(task_id, "Task")?;
        let assignee_id = assignee_id.trim();
        if assignee_id.is_empty() {
            return Err(TodoError::validation("Assignee user id must not be empty"));
        }

        let access = TaskAccess::load(&self.pool, task_id).await?;
        access.require_owner(user_id, "assign this task")?;

        Task::set_assignee(&self.pool, task_id, assignee_id).await?;

        info!(
            task_id,
            owner_id = %user_id,
            assignee_id = %assignee_id,
            "Assigned task"
        );
        Ok(())
    }
}
