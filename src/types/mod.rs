//! Transfer objects, request bodies and query types shared by the API, the
//! remote client and the front-end.

pub mod dto;
pub mod paged;
pub mod query;

pub use dto::{
    CommentDto, CreateTaskRequest, CreateTodoListRequest, TagDto, TaskDto, TodoListDto,
    UpdateTaskRequest, UpdateTodoListRequest,
};
pub use paged::{PageRequest, PagedResult};
pub use query::{AssignedTaskSort, AssignedTasksQuery, TaskSearchQuery};

use crate::error::{TodoError, TodoResult};
use validator::{Validate, ValidationError, ValidationErrors};

/// Run derive-based validation and fold failures into a single validation error
pub fn validate_request<T: Validate>(request: &T) -> TodoResult<()> {
    request
        .validate()
        .map_err(|errors| TodoError::Validation(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}
