//! Task record and its persisted form.

use super::{TaskId, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of work with open/close timestamps, author, assignee, title and
/// content.
///
/// Timestamps are epoch seconds; `closed` is `0` while the task is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    opened: i64,
    closed: i64,
    author: User,
    assigned: User,
    title: String,
    content: String,
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored task identifier.
    pub id: TaskId,
    /// Opening time in epoch seconds.
    pub opened: i64,
    /// Closing time in epoch seconds, `0` when open.
    pub closed: i64,
    /// Joined author row.
    pub author: User,
    /// Joined assignee row.
    pub assigned: User,
    /// Task title.
    pub title: String,
    /// Task body.
    pub content: String,
}

impl Task {
    /// Creates an unsaved, open task with both timestamps at zero.
    #[must_use]
    pub fn new(
        author: User,
        assigned: User,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId::UNASSIGNED,
            opened: 0,
            closed: 0,
            author,
            assigned,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Reconstructs a task from a stored row.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            opened: data.opened,
            closed: data.closed,
            author: data.author,
            assigned: data.assigned,
            title: data.title,
            content: data.content,
        }
    }

    /// Sets the task identifier.
    #[must_use]
    pub const fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    /// Sets the opening time in epoch seconds.
    #[must_use]
    pub const fn with_opened(mut self, opened: i64) -> Self {
        self.opened = opened;
        self
    }

    /// Sets the closing time in epoch seconds.
    #[must_use]
    pub const fn with_closed(mut self, closed: i64) -> Self {
        self.closed = closed;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the opening time in epoch seconds.
    #[must_use]
    pub const fn opened(&self) -> i64 {
        self.opened
    }

    /// Returns the closing time in epoch seconds.
    #[must_use]
    pub const fn closed(&self) -> i64 {
        self.closed
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> &User {
        &self.author
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assigned(&self) -> &User {
        &self.assigned
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` once a closing time has been recorded.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed != 0
    }

    /// Returns the opening time, or `None` if it is out of range.
    #[must_use]
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.opened, 0)
    }

    /// Returns the closing time, or `None` while the task is open.
    #[must_use]
    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        if self.is_closed() {
            DateTime::from_timestamp(self.closed, 0)
        } else {
            None
        }
    }
}
