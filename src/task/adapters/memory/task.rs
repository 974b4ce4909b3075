//! In-memory repository for task storage tests.
//!
//! Mirrors the relational rules of the `PostgreSQL` adapter: identifiers are
//! assigned sequentially, author and assignee must reference known users,
//! batches are all-or-nothing, and deleting a task drops its label
//! associations.

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, User, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, WriteOutcome},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    users: HashMap<UserId, User>,
    tasks: BTreeMap<TaskId, Task>,
    labels: HashMap<String, i32>,
    associations: BTreeSet<(TaskId, i32)>,
    last_task_id: i32,
    last_label_id: i32,
}

impl InMemoryTaskState {
    fn check_user(&self, id: UserId, column: &str) -> TaskRepositoryResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(foreign_key_violation(format!(
                "{column} {id} is not present in table \"users\""
            )))
        }
    }

    fn check_task(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.check_user(task.author().id(), "author_id")?;
        self.check_user(task.assigned().id(), "assigned_id")
    }

    /// Joins a stored task with its author and assignee rows.
    fn hydrate(&self, task: &Task) -> Option<Task> {
        let author = self.users.get(&task.author().id())?.clone();
        let assigned = self.users.get(&task.assigned().id())?.clone();
        Some(Task::from_persisted(PersistedTaskData {
            id: task.id(),
            opened: task.opened(),
            closed: task.closed(),
            author,
            assigned,
            title: task.title().to_owned(),
            content: task.content().to_owned(),
        }))
    }

    fn hydrate_all<'a>(&self, tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
        tasks.filter_map(|task| self.hydrate(task)).collect()
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository whose `users` table holds the given rows.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let state = InMemoryTaskState {
            users: users.into_iter().map(|user| (user.id(), user)).collect(),
            ..InMemoryTaskState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Adds or replaces a user row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Connection`] if the state lock is
    /// poisoned.
    pub fn add_user(&self, user: User) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.users.insert(user.id(), user);
        Ok(())
    }

    /// Adds a label, returning without change when it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Connection`] if the state lock is
    /// poisoned.
    pub fn add_label(&self, name: &str) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.labels.contains_key(name) {
            state.last_label_id += 1;
            let label_id = state.last_label_id;
            state.labels.insert(name.to_owned(), label_id);
        }
        Ok(())
    }

    /// Associates an existing task with an existing label.
    ///
    /// Tagging the same pair twice keeps a single association.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Statement`] when the task or label does
    /// not exist.
    pub fn tag_task(&self, id: TaskId, label: &str) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&id) {
            return Err(foreign_key_violation(format!(
                "task_id {id} is not present in table \"tasks\""
            )));
        }
        let label_id = *state.labels.get(label).ok_or_else(|| {
            foreign_key_violation(format!("label {label} is not present in table \"labels\""))
        })?;
        state.associations.insert((id, label_id));
        Ok(())
    }

    /// Returns the number of label associations held for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Connection`] if the state lock is
    /// poisoned.
    pub fn association_count(&self, id: TaskId) -> TaskRepositoryResult<usize> {
        let state = self.read()?;
        Ok(state
            .associations
            .iter()
            .filter(|(task_id, _)| *task_id == id)
            .count())
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskRepositoryError::connection(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskRepositoryError::connection(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create_tasks(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        // Validate the whole batch before touching state so a bad row leaves
        // nothing behind.
        for task in tasks {
            state.check_task(task)?;
        }
        for task in tasks {
            state.last_task_id += 1;
            let id = TaskId::new(state.last_task_id);
            state.tasks.insert(id, task.clone().with_id(id));
        }
        Ok(())
    }

    async fn read_all_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.hydrate_all(state.tasks.values()))
    }

    async fn read_task_by_id(&self, id: TaskId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.hydrate_all(state.tasks.get(&id).into_iter()))
    }

    async fn read_tasks_by_tag(&self, tag: &str) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let Some(&label_id) = state.labels.get(tag) else {
            return Ok(Vec::new());
        };
        let tagged = state
            .associations
            .iter()
            .filter(|(_, associated_label)| *associated_label == label_id)
            .filter_map(|(task_id, _)| state.tasks.get(task_id));
        Ok(state.hydrate_all(tagged))
    }

    async fn update_task_by_id(
        &self,
        id: TaskId,
        task: &Task,
    ) -> TaskRepositoryResult<WriteOutcome> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&id) {
            return Ok(WriteOutcome::NotFound);
        }
        state.check_task(task)?;
        state.tasks.insert(id, task.clone().with_id(id));
        Ok(WriteOutcome::Applied)
    }

    async fn delete_task_by_id(&self, id: TaskId) -> TaskRepositoryResult<WriteOutcome> {
        let mut state = self.write()?;
        state.associations.retain(|(task_id, _)| *task_id != id);
        Ok(if state.tasks.remove(&id).is_some() {
            WriteOutcome::Applied
        } else {
            WriteOutcome::NotFound
        })
    }
}

fn foreign_key_violation(message: String) -> TaskRepositoryError {
    TaskRepositoryError::statement(DieselError::DatabaseError(
        DatabaseErrorKind::ForeignKeyViolation,
        Box::new(message),
    ))
}
