//! View models handed to templates. Dates are pre-formatted and enums are
//! resolved to badges here so templates contain no logic beyond loops.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::frontend::presentation::{
    date_input_value, format_date, format_due_date, is_overdue, priority_badge, status_badge,
    BadgeDescriptor,
};
use crate::models::{TaskPriority, TaskStatus};
use crate::types::{CommentDto, PagedResult, TagDto, TaskDto, TodoListDto};

#[derive(Debug, Clone, Serialize)]
pub struct TodoListView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created: String,
    pub task_count: i64,
}

impl From<&TodoListDto> for TodoListView {
    fn from(dto: &TodoListDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title.clone(),
            description: dto.description.clone(),
            created: format_date(dto.created_date),
            task_count: dto.task_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: i64,
    pub todo_list_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created: String,
    pub due: String,
    pub due_input: String,
    pub completed: Option<String>,
    pub is_completed: bool,
    pub is_overdue: bool,
    pub status: BadgeDescriptor,
    pub status_value: &'static str,
    pub priority: BadgeDescriptor,
    pub priority_value: &'static str,
    pub assigned_to: Option<String>,
}

impl TaskView {
    pub fn new(dto: &TaskDto, today: NaiveDate) -> Self {
        Self {
            id: dto.id,
            todo_list_id: dto.todo_list_id,
            title: dto.title.clone(),
            description: dto.description.clone(),
            created: format_date(dto.created_date),
            due: format_due_date(dto.due_date),
            due_input: date_input_value(dto.due_date),
            completed: dto.completed_date.map(format_date),
            is_completed: dto.is_completed,
            is_overdue: is_overdue(dto.due_date, dto.is_completed, today),
            status: status_badge(dto.status),
            status_value: dto.status.as_str(),
            priority: priority_badge(dto.priority),
            priority_value: dto.priority.as_str(),
            assigned_to: dto.assigned_to_user_id.clone(),
        }
    }

    pub fn list(tasks: &[TaskDto]) -> Vec<Self> {
        let today = Utc::now().date_naive();
        tasks.iter().map(|task| Self::new(task, today)).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub task_id: i64,
    pub content: String,
    pub created: String,
    pub created_by: String,
    pub is_mine: bool,
}

impl CommentView {
    pub fn new(dto: &CommentDto, viewer_id: &str) -> Self {
        Self {
            id: dto.id,
            task_id: dto.task_id,
            content: dto.content.clone(),
            created: dto.created_date.format("%b %d, %Y %H:%M").to_string(),
            created_by: dto.created_by.clone(),
            is_mine: dto.created_by == viewer_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub id: i64,
    pub name: String,
    pub task_count: i64,
}

impl From<&TagDto> for TagView {
    fn from(dto: &TagDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.clone(),
            task_count: dto.task_count,
        }
    }
}

/// Select option with its current selection state
#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub fn status_options(selected: Option<TaskStatus>) -> Vec<OptionView> {
    TaskStatus::ALL
        .iter()
        .map(|status| OptionView {
            value: status.as_str(),
            label: status_badge(*status).label,
            selected: selected == Some(*status),
        })
        .collect()
}

pub fn priority_options(selected: TaskPriority) -> Vec<OptionView> {
    TaskPriority::ALL
        .iter()
        .map(|priority| OptionView {
            value: priority.as_str(),
            label: priority_badge(*priority).label,
            selected: selected == *priority,
        })
        .collect()
}

/// Previous/next links for a paged listing
#[derive(Debug, Clone, Serialize)]
pub struct PagerView {
    pub page_number: u32,
    pub total_pages: u32,
    pub total_count: i64,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
}

impl PagerView {
    /// `params` are the listing's other query parameters, kept on every link
    pub fn new<T>(page: &PagedResult<T>, path: &str, params: &[(&str, String)]) -> Self {
        let link = |number: u32| {
            let mut pairs: Vec<(&str, String)> = params
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .cloned()
                .collect();
            pairs.push(("page", number.to_string()));
            match serde_urlencoded::to_string(&pairs) {
                Ok(query) => format!("{path}?{query}"),
                Err(_) => path.to_string(),
            }
        };
        Self {
            page_number: page.page_number,
            total_pages: page.total_pages,
            total_count: page.total_count,
            previous_url: page
                .has_previous_page
                .then(|| link(page.page_number - 1)),
            next_url: page.has_next_page.then(|| link(page.page_number + 1)),
        }
    }
}
