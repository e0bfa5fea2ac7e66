//! Field limits and paging defaults shared by validation, services and the API.

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const COMMENT_MAX_LEN: usize = 2000;
pub const TAG_NAME_MAX_LEN: usize = 50;

pub const MAX_PAGE_SIZE: u32 = 100;

/// `GET /api/todolist` defaults
pub const TODO_LIST_DEFAULT_PAGE_SIZE: u32 = 20;
/// Assigned-task listing and search defaults
pub const TASK_QUERY_DEFAULT_PAGE_SIZE: u32 = 10;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Role linked to every registered user
pub const DEFAULT_ROLE: &str = "User";

pub const MIN_PASSWORD_LEN: usize = 3;
