mod assigned_tasks;
mod comments;
mod search;
mod tags;
mod tasks;
mod todo_lists;
