//! # Comment Service
//!
//! Owners and assignees can read and add comments. Editing and deleting
//! stays with the list owner, whoever wrote the comment.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use super::authorization::{ensure_positive_id, ensure_user_id, TaskAccess};
use super::CommentService;
use crate::constants::COMMENT_MAX_LEN;
use crate::error::{TodoError, TodoResult};
use crate::models::{Comment, NewComment};
use crate::types::CommentDto;

#[derive(Debug, Clone)]
pub struct DatabaseCommentService {
    pool: SqlitePool,
}

impl DatabaseCommentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_comment(&self, comment_id: i64) -> TodoResult<Comment> {
        ensure_positive_id(comment_id, "Comment")?;
        Comment::find_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| TodoError::not_found(format!("Comment with ID {comment_id} not found")))
    }
}

fn validate_content(content: &str) -> TodoResult<&str> {
    let content = content.trim();
    if content.is_empty() {
        return Err(TodoError::validation("Comment content must not be empty"));
    }
    if content.chars().count() > COMMENT_MAX_LEN {
        return Err(TodoError::validation(format!(
            "Comment content must be at most {COMMENT_MAX_LEN} characters"
        )));
    }
    Ok(content)
}

#[async_trait]
impl CommentService for DatabaseCommentService {
    async fn get_by_task(&self, task_id: i64, user_id: &str) -> TodoResult<Vec<CommentDto>> {
        ensure_user_id(user_id)?;
        let access = TaskAccess::load(&self.pool, task_id).await?;
        access.require_owner_or_assignee(user_id, "view comments on this task")?;

        let comments = Comment::list_by_task(&self.pool, task_id).await?;
        Ok(comments.into_iter().map(CommentDto::from).collect())
    }

    async fn add(&self, task_id: i64, content: &str, user_id: &str) -> TodoResult<CommentDto> {
        ensure_user_id(user_id)?;
        let content = validate_content(content)?;
        let access = TaskAccess::load(&self.pool, task_id).await?;
        access.require_owner_or_assignee(user_id, "comment on this task")?;

        let comment = Comment::create(
            &self.pool,
            NewComment {
                task_id,
                content: content.to_string(),
                created_by: user_id.to_string(),
            },
        )
        .await?;

        info!(comment_id = comment.id, task_id, user_id = %user_id, "Added comment");
        Ok(comment.into())
    }

    async fn update(&self, comment_id: i64, content: &str, user_id: &str) -> TodoResult<()> {
        ensure_user_id(user_id)?;
        let content = validate_content(content)?;
        let comment = self.load_comment(comment_id).await?;
        let access = TaskAccess::load(&self.pool, comment.task_id).await?;
        access.require_owner(user_id, "edit comments on this task")?;

        Comment::update_content(&self.pool, comment_id, content).await?;

        info!(comment_id, user_id = %user_id, "Updated comment");
        Ok(())
    }

    async fn delete(&self, comment_id: i64, user_id: &str) -> TodoResult<()> {
        ensure_user_id(user_id)?;
        let comment = self.load_comment(comment_id).await?;
        let access = TaskAccess::load(&self.pool, comment.task_id).await?;
        access.require_owner(user_id, "delete comments on this task")?;

        Comment::delete(&self.pool, comment_id).await?;

        info!(comment_id, user_id = %user_id, "Deleted comment");
        Ok(())
    }
}
