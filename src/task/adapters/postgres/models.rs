//! Diesel row models for task storage.

use super::schema::tasks;
use crate::task::domain::{PersistedTaskData, Task, TaskId, User};
use diesel::prelude::*;

/// Query result row for a task joined with its author and assignee.
#[derive(Debug, Clone, QueryableByName)]
pub struct TaskJoinRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub id: i32,
    /// Opening time in epoch seconds.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub opened: i64,
    /// Closing time in epoch seconds.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub closed: i64,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title: String,
    /// Task body.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub content: String,
    /// Author identifier.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub author_id: i32,
    /// Author display name.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub author_name: String,
    /// Assignee identifier.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub assigned_id: i32,
    /// Assignee display name.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub assigned_name: String,
}

impl From<TaskJoinRow> for Task {
    fn from(row: TaskJoinRow) -> Self {
        Self::from_persisted(PersistedTaskData {
            id: TaskId::new(row.id),
            opened: row.opened,
            closed: row.closed,
            author: User::new(row.author_id, row.author_name),
            assigned: User::new(row.assigned_id, row.assigned_name),
            title: row.title,
            content: row.content,
        })
    }
}

/// Column values written on insert and on full-row update.
///
/// The identifier is left to the `tasks_id_seq` default on insert and used
/// only as the filter on update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskWriteRow {
    /// Opening time in epoch seconds.
    pub opened: i64,
    /// Closing time in epoch seconds.
    pub closed: i64,
    /// Task title.
    pub title: String,
    /// Task body.
    pub content: String,
    /// Author identifier.
    pub author_id: i32,
    /// Assignee identifier.
    pub assigned_id: i32,
}

impl From<&Task> for TaskWriteRow {
    fn from(task: &Task) -> Self {
        Self {
            opened: task.opened(),
            closed: task.closed(),
            title: task.title().to_owned(),
            content: task.content().to_owned(),
            author_id: task.author().id().into_inner(),
            assigned_id: task.assigned().id().into_inner(),
        }
    }
}
