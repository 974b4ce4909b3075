//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Whether a keyed write found its target row.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The row existed and the write was applied.
    Applied,
    /// No row carried the requested identifier; nothing changed.
    NotFound,
}

impl WriteOutcome {
    /// Builds an outcome from an affected-row count.
    pub const fn from_affected(rows: usize) -> Self {
        if rows == 0 { Self::NotFound } else { Self::Applied }
    }

    /// Returns `true` when the target row existed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores every task in one all-or-nothing batch.
    ///
    /// Task identifiers are ignored and assigned by storage; the generated
    /// identifiers are not returned. Only the author and assignee ids are
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Statement`] when any row is rejected
    /// (for example an unknown author or assignee), in which case no task
    /// from the batch is stored.
    async fn create_tasks(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Returns every task with author and assignee populated.
    ///
    /// An empty store yields an empty vector.
    async fn read_all_tasks(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the task with the given identifier, if any.
    ///
    /// The result holds zero or one task; a missing id is not an error.
    async fn read_task_by_id(&self, id: TaskId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task carrying the named label.
    async fn read_tasks_by_tag(&self, tag: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Replaces every mutable field of the task with the given identifier.
    ///
    /// The identifier inside `task` is ignored in favour of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Statement`] when the new author or
    /// assignee does not exist.
    async fn update_task_by_id(
        &self,
        id: TaskId,
        task: &Task,
    ) -> TaskRepositoryResult<WriteOutcome>;

    /// Deletes the task and its label associations.
    ///
    /// Deleting an id that does not exist reports [`WriteOutcome::NotFound`].
    async fn delete_task_by_id(&self, id: TaskId) -> TaskRepositoryResult<WriteOutcome>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The pool could not be built or could not hand out a connection.
    #[error("connection error: {0}")]
    Connection(Arc<dyn std::error::Error + Send + Sync>),

    /// Beginning, committing or rolling back a transaction failed.
    #[error("transaction error: {0}")]
    Transaction(Arc<dyn std::error::Error + Send + Sync>),

    /// A statement was rejected or its rows could not be read.
    #[error("statement error: {0}")]
    Statement(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a connection failure.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Arc::new(err))
    }

    /// Wraps a transaction control failure.
    pub fn transaction(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transaction(Arc::new(err))
    }

    /// Wraps a statement failure.
    pub fn statement(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Statement(Arc::new(err))
    }

    /// Returns `true` when a statement broke a foreign key, such as an
    /// unknown author or assignee.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        let Self::Statement(source) = self else {
            return false;
        };
        matches!(
            source.downcast_ref::<DieselError>(),
            Some(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                _
            ))
        )
    }
}

impl From<DieselError> for TaskRepositoryError {
    /// Errors reaching this conversion come from `Connection::transaction`
    /// itself; statement failures inside a transaction are mapped with
    /// [`TaskRepositoryError::statement`] before they get here.
    fn from(err: DieselError) -> Self {
        Self::transaction(err)
    }
}
