//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{TaskJoinRow, TaskWriteRow},
    queries::{READ_ALL_TASKS, READ_TASK_BY_ID, READ_TASKS_BY_TAG},
    schema::{tasks, tasks_labels},
};
use crate::config::DatabaseConfig;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, WriteOutcome},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use std::time::Duration;
use tracing::{debug, warn};

/// Rows per `INSERT` statement. Each row binds six parameters and a
/// statement may carry at most 65,535.
const MAX_BATCH_ROWS: usize = 10_000;

/// `PostgreSQL` connection pool type used by the task repository.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Owns its pool handle. Dropping the repository (or calling
/// [`PostgresTaskRepository::close`]) releases the pooled connections once no
/// clone of the pool remains.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool from the configuration and wraps it.
    ///
    /// The pool opens its initial connections eagerly, so an unreachable
    /// server is reported here rather than on the first call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Connection`] when the pool cannot be
    /// established within the configured connection timeout.
    pub fn connect(config: &DatabaseConfig) -> TaskRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(config.connection_string());
        let mut builder = TaskPgPool::builder()
            .max_size(config.max_connections())
            .connection_timeout(config.connection_timeout());
        if let Some(timeout) = config.statement_timeout() {
            builder = builder.connection_customizer(Box::new(StatementTimeout(timeout)));
        }
        let pool = builder
            .build(manager)
            .map_err(TaskRepositoryError::connection)?;
        debug!(
            max_connections = config.max_connections(),
            "task repository connected"
        );
        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &TaskPgPool {
        &self.pool
    }

    /// Releases this repository's pool handle.
    pub fn close(self) {
        drop(self.pool);
        debug!("task repository closed");
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::connection)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::connection)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create_tasks(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        if tasks.is_empty() {
            return Ok(());
        }
        let rows: Vec<TaskWriteRow> = tasks.iter().map(TaskWriteRow::from).collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let mut inserted = 0;
                for chunk in rows.chunks(MAX_BATCH_ROWS) {
                    inserted += diesel::insert_into(tasks::table)
                        .values(chunk)
                        .execute(tx)
                        .map_err(TaskRepositoryError::statement)?;
                }
                debug!(inserted, "inserted task batch");
                Ok(())
            })
        })
        .await
    }

    async fn read_all_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            into_tasks(diesel::sql_query(READ_ALL_TASKS).load::<TaskJoinRow>(connection))
        })
        .await
    }

    async fn read_task_by_id(&self, id: TaskId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(READ_TASK_BY_ID)
                .bind::<diesel::sql_types::Integer, _>(id.into_inner())
                .load::<TaskJoinRow>(connection);
            into_tasks(rows)
        })
        .await
    }

    async fn read_tasks_by_tag(&self, tag: &str) -> TaskRepositoryResult<Vec<Task>> {
        let label = tag.to_owned();
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(READ_TASKS_BY_TAG)
                .bind::<diesel::sql_types::Text, _>(label)
                .load::<TaskJoinRow>(connection);
            into_tasks(rows)
        })
        .await
    }

    async fn update_task_by_id(
        &self,
        id: TaskId,
        task: &Task,
    ) -> TaskRepositoryResult<WriteOutcome> {
        let row = TaskWriteRow::from(task);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let updated = diesel::update(tasks::table.find(id.into_inner()))
                    .set(&row)
                    .execute(tx)
                    .map_err(TaskRepositoryError::statement)?;
                debug!(task_id = %id, updated, "updated task");
                Ok(not_found_warning(id, WriteOutcome::from_affected(updated)))
            })
        })
        .await
    }

    async fn delete_task_by_id(&self, id: TaskId) -> TaskRepositoryResult<WriteOutcome> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                // Associations go first so a foreign key from tasks_labels to
                // tasks never sees a dangling row.
                let unlinked = diesel::delete(
                    tasks_labels::table.filter(tasks_labels::task_id.eq(id.into_inner())),
                )
                .execute(tx)
                .map_err(TaskRepositoryError::statement)?;
                let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                    .execute(tx)
                    .map_err(TaskRepositoryError::statement)?;
                debug!(task_id = %id, unlinked, deleted, "deleted task");
                Ok(not_found_warning(id, WriteOutcome::from_affected(deleted)))
            })
        })
        .await
    }
}

fn into_tasks(result: QueryResult<Vec<TaskJoinRow>>) -> TaskRepositoryResult<Vec<Task>> {
    let rows = result.map_err(TaskRepositoryError::statement)?;
    debug!(rows = rows.len(), "loaded tasks");
    Ok(rows.into_iter().map(Task::from).collect())
}

fn not_found_warning(id: TaskId, outcome: WriteOutcome) -> WriteOutcome {
    if !outcome.is_applied() {
        warn!(task_id = %id, "no task row matched");
    }
    outcome
}

/// Applies `statement_timeout` to every connection the pool hands out.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout(Duration);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET statement_timeout = {}", self.0.as_millis()))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}
