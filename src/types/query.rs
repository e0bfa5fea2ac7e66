use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::paged::PageRequest;
use crate::constants::TASK_QUERY_DEFAULT_PAGE_SIZE;
use crate::models::task::AssignedTaskOrder;
use crate::models::TaskStatus;

/// Sort key accepted by the assigned-task listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignedTaskSort {
    Name,
    #[default]
    DueDate,
    Priority,
    Status,
}

impl AssignedTaskSort {
    pub const ALL: [AssignedTaskSort; 4] = [Self::Name, Self::DueDate, Self::Priority, Self::Status];

    /// Case-insensitive; anything unrecognized sorts by due date
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" | "title" => Self::Name,
            "priority" => Self::Priority,
            "status" => Self::Status,
            _ => Self::DueDate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DueDate => "duedate",
            Self::Priority => "priority",
            Self::Status => "status",
        }
    }

    pub fn order(&self) -> AssignedTaskOrder {
        match self {
            Self::Name => AssignedTaskOrder::Title,
            Self::DueDate => AssignedTaskOrder::DueDate,
            Self::Priority => AssignedTaskOrder::PriorityDesc,
            Self::Status => AssignedTaskOrder::Status,
        }
    }
}

impl fmt::Display for AssignedTaskSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedTasksQuery {
    /// `None` lists everything except Completed
    pub status: Option<TaskStatus>,
    pub sort_by: AssignedTaskSort,
    pub page: PageRequest,
}

impl Default for AssignedTasksQuery {
    fn default() -> Self {
        Self {
            status: None,
            sort_by: AssignedTaskSort::default(),
            page: PageRequest::new(1, TASK_QUERY_DEFAULT_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSearchQuery {
    pub text: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: PageRequest,
}

impl TaskSearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Trimmed search text, `None` when blank
    pub fn normalized_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn has_criteria(&self) -> bool {
        self.normalized_text().is_some() || self.start_date.is_some() || self.end_date.is_some()
    }
}

impl Default for TaskSearchQuery {
    fn default() -> Self {
        Self {
            text: None,
            start_date: None,
            end_date: None,
            page: PageRequest::new(1, TASK_QUERY_DEFAULT_PAGE_SIZE),
        }
    }
}
