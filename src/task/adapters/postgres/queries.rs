//! Read queries joining tasks to their author and assignee.
//!
//! Every query selects the same column list so rows decode into
//! [`TaskJoinRow`](super::models::TaskJoinRow).

macro_rules! task_columns {
    () => {
        concat!(
            "SELECT t.id, t.opened, t.closed, t.title, t.content, ",
            "u.id AS author_id, u.name AS author_name, ",
            "u2.id AS assigned_id, u2.name AS assigned_name ",
        )
    };
}

macro_rules! user_joins {
    () => {
        concat!(
            "INNER JOIN users AS u ON t.author_id = u.id ",
            "INNER JOIN users AS u2 ON t.assigned_id = u2.id ",
        )
    };
}

/// Every task, ordered by identifier.
pub const READ_ALL_TASKS: &str = concat!(
    task_columns!(),
    "FROM tasks AS t ",
    user_joins!(),
    "ORDER BY t.id",
);

/// The task whose identifier is bound as `$1`.
pub const READ_TASK_BY_ID: &str = concat!(
    task_columns!(),
    "FROM tasks AS t ",
    user_joins!(),
    "WHERE t.id = $1",
);

/// Tasks carrying the label whose name is bound as `$1`.
pub const READ_TASKS_BY_TAG: &str = concat!(
    task_columns!(),
    "FROM labels AS l ",
    "INNER JOIN tasks_labels AS tl ON tl.label_id = l.id ",
    "INNER JOIN tasks AS t ON t.id = tl.task_id ",
    user_joins!(),
    "WHERE l.name = $1 ",
    "ORDER BY t.id",
);
