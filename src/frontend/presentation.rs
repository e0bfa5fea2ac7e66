//! Display helpers for status, priority and dates. Pure functions over the
//! domain enums so templates never see raw discriminants.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{TaskPriority, TaskStatus};

/// Label and CSS class for a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeDescriptor {
    pub label: &'static str,
    pub css_class: &'static str,
}

pub fn status_badge(status: TaskStatus) -> BadgeDescriptor {
    match status {
        TaskStatus::NotStarted => BadgeDescriptor {
            label: "Not Started",
            css_class: "badge bg-secondary",
        },
        TaskStatus::InProgress => BadgeDescriptor {
            label: "In Progress",
            css_class: "badge bg-primary",
        },
        TaskStatus::Completed => BadgeDescriptor {
            label: "Completed",
            css_class: "badge bg-success",
        },
    }
}

pub fn priority_badge(priority: TaskPriority) -> BadgeDescriptor {
    match priority {
        TaskPriority::Low => BadgeDescriptor {
            label: "Low",
            css_class: "badge bg-info",
        },
        TaskPriority::Medium => BadgeDescriptor {
            label: "Medium",
            css_class: "badge bg-warning text-dark",
        },
        TaskPriority::High => BadgeDescriptor {
            label: "High",
            css_class: "badge bg-danger",
        },
    }
}

/// Due strictly before `today` and not yet completed
pub fn is_overdue(due_date: Option<DateTime<Utc>>, is_completed: bool, today: NaiveDate) -> bool {
    match due_date {
        Some(due) => !is_completed && due.date_naive() < today,
        None => false,
    }
}

/// `Jan 05, 2025`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %d, %Y").to_string()
}

pub fn format_due_date(due_date: Option<DateTime<Utc>>) -> String {
    due_date.map_or_else(|| "No due date".to_string(), format_date)
}

/// Value for an `<input type="date">`
pub fn date_input_value(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
