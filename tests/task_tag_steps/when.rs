//! When steps for task tag BDD scenarios.

use super::world::{TaskStoreWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasks::task::{
    domain::{Task, TaskId, User},
    ports::TaskRepository,
};

#[when(r#"tasks are read by tag "{tag}""#)]
fn read_by_tag(world: &mut TaskStoreWorld, tag: String) -> Result<(), eyre::Report> {
    let tasks = run_async(world.repository.read_tasks_by_tag(&tag)).wrap_err("read by tag")?;
    world.last_read = Some(tasks);
    Ok(())
}

#[when("task {id:i32} is deleted")]
fn delete_task(world: &mut TaskStoreWorld, id: i32) -> Result<(), eyre::Report> {
    let outcome =
        run_async(world.repository.delete_task_by_id(TaskId::new(id))).wrap_err("delete task")?;
    world.last_delete = Some(outcome);
    Ok(())
}

#[when("a batch assigning a task to user {user:i32} is created")]
fn create_batch_with_assignee(world: &mut TaskStoreWorld, user: i32) {
    let batch = vec![
        Task::new(User::reference(1), User::reference(2), "Valid", "Valid"),
        Task::new(User::reference(1), User::reference(user), "Orphan", "Orphan"),
    ];
    world.last_create = Some(run_async(world.repository.create_tasks(&batch)));
}
