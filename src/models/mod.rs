//! # Data Layer
//!
//! One module per table. Each model carries its own queries as associated
//! functions taking the pool explicitly; authorization lives in the services.

pub mod comment;
pub mod tag;
pub mod task;
pub mod todo_list;
pub mod user;

pub use comment::{Comment, NewComment};
pub use tag::{Tag, TagWithCount};
pub use task::{NewTask, Task, TaskPriority, TaskStatus, TaskUpdate};
pub use todo_list::{NewTodoList, TodoList, TodoListWithCount};
pub use user::{NewUser, Role, User};
