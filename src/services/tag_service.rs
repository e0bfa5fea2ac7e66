//! # Tag Service
//!
//! Tags are global rows keyed by normalized name, but every read is scoped
//! to the tasks the caller owns or is assigned to.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use super::authorization::{ensure_positive_id, ensure_user_id, TaskAccess};
use super::TagService;
use crate::constants::TAG_NAME_MAX_LEN;
use crate::error::{TodoError, TodoResult};
use crate::models::{Tag, Task};
use crate::types::{TagDto, TaskDto};

#[derive(Debug, Clone)]
pub struct DatabaseTagService {
    pool: SqlitePool,
}

impl DatabaseTagService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn validate_tag_name(name: &str) -> TodoResult<String> {
    let normalized = Tag::normalize_name(name);
    if normalized.is_empty() {
        return Err(TodoError::validation("Tag name must not be empty"));
    }
    if normalized.chars().count() > TAG_NAME_MAX_LEN {
        return Err(TodoError::validation(format!(
            "Tag name must be at most {TAG_NAME_MAX_LEN} characters"
        )));
    }
    Ok(normalized)
}

#[async_trait]
impl TagService for DatabaseTagService {
    async fn get_all(&self, user_id: &str) -> TodoResult<Vec<TagDto>> {
        ensure_user_id(user_id)?;
        let tags = Tag::list_for_user(&self.pool, user_id).await?;
        Ok(tags.into_iter().map(TagDto::from).collect())
    }

    async fn get_by_task(&self, task_id: i64, user_id: &str) -> TodoResult<Vec<TagDto>> {
        ensure_user_id(user_id)?;
        let access = TaskAccess::load(&self.pool, task_id).await?;
        access.require_owner_or_assignee(user_id, "view tags on this task")?;

        let tags = Tag::list_for_task(&self.pool, task_id, user_id).await?;
        Ok(tags.into_iter().map(TagDto::from).collect())
    }

    async fn get_tasks_by_tag(&self, tag_id: i64, user_id: &str) -> TodoResult<Vec<TaskDto>> {
        ensure_positive_id(tag_id, "Tag")?;
        ensure_user_id(user_id)?;

        let tasks = Task::list_by_tag_for_user(&self.pool, tag_id, user_id).await?;
        Ok(tasks.into_iter().map(TaskDto::from).collect())
    }

    async fn add_to_task(&self, task_id: i64, name: &str, user_id: &str) -> TodoResult<TagDto> {
        ensure_user_id(user_id)?;
        let name = validate_tag_name(name)?;
        let access = TaskAccess::load(&self.pool, task_id).await?;
        access.require_owner(user_id, "tag this task")?;

        let tag = Tag::get_or_create(&self.pool, &name).await?;
        Tag::attach(&self.pool, task_id, tag.id).await?;

        info!(task_id, tag_id = tag.id, tag = %tag.name, user_id = %user_id, "Tagged task");

        let tagged = Tag::list_for_task(&self.pool, task_id, user_id)
            .await?
            .into_iter()
            .find(|row| row.id == tag.id)
            .map(TagDto::from)
            .unwrap_or_else(|| TagDto::from(tag));
        Ok(tagged)
    }

    async fn remove_from_task(&self, task_id: i64, tag_id: i64, user_id: &str) -> TodoResult<()> {
        ensure_user_id(user_id)?;
        ensure_positive_id(tag_id, "Tag")?;
        let access = TaskAccess::load(&self.pool, task_id).await?;
        access.require_owner(user_id, "remove tags from this task")?;

        if Tag::detach(&self.pool, task_id, tag_id).await? {
            info!(task_id, tag_id, user_id = %user_id, "Removed tag from task");
        }
        Ok(())
    }
}
