//! # Search Service

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::authorization::ensure_user_id;
use super::SearchService;
use crate::error::{TodoError, TodoResult};
use crate::models::task::TaskSearchFilter;
use crate::models::Task;
use crate::types::{PagedResult, TaskDto, TaskSearchQuery};

#[derive(Debug, Clone)]
pub struct DatabaseSearchService {
    pool: SqlitePool,
}

impl DatabaseSearchService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchService for DatabaseSearchService {
    /// Text and date search over tasks the caller owns or is assigned to
    async fn search(
        &self,
        user_id: &str,
        query: &TaskSearchQuery,
    ) -> TodoResult<PagedResult<TaskDto>> {
        ensure_user_id(user_id)?;
        query.page.validate()?;
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(TodoError::validation(
                    "startDate must not be after endDate",
                ));
            }
        }

        let filter = TaskSearchFilter {
            user_id,
            text: query.normalized_text(),
            start_date: query.start_date,
            end_date: query.end_date,
        };

        let total_count = Task::count_search(&self.pool, &filter).await?;
        let tasks = Task::search(&self.pool, &filter, query.page.limit(), query.page.offset())
            .await?;

        debug!(
            user_id = %user_id,
            text = ?filter.text,
            start_date = ?filter.start_date,
            end_date = ?filter.end_date,
            total_count,
            "Searched tasks"
        );
        Ok(PagedResult::new(
            tasks.into_iter().map(TaskDto::from).collect(),
            total_count,
            query.page.page_number,
            query.page.page_size,
        ))
    }
}
