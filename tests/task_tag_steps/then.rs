//! Then steps for task tag BDD scenarios.

use super::world::{TaskStoreWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use tasks::task::ports::{TaskRepository, WriteOutcome};

#[then("{count:usize} tasks are returned")]
fn tasks_returned(world: &TaskStoreWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = world
        .last_read
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing read result in scenario world"))?;
    eyre::ensure!(
        tasks.len() == count,
        "expected {count} tasks, found {}",
        tasks.len()
    );
    Ok(())
}

#[then("every returned task has its author name populated")]
fn author_names_populated(world: &TaskStoreWorld) -> Result<(), eyre::Report> {
    let tasks = world
        .last_read
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing read result in scenario world"))?;
    eyre::ensure!(
        tasks.iter().all(|task| task.author().name() == "Gus Fring"),
        "expected every author to be joined by name"
    );
    Ok(())
}

#[then("the delete is applied")]
fn delete_applied(world: &TaskStoreWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_delete == Some(WriteOutcome::Applied),
        "expected an applied delete, got {:?}",
        world.last_delete
    );
    Ok(())
}

#[then("the batch fails with a foreign key violation")]
fn batch_fails(world: &TaskStoreWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result in scenario world"))?;
    match result {
        Err(err) if err.is_foreign_key_violation() => Ok(()),
        other => Err(eyre::eyre!("expected foreign key violation, got {other:?}")),
    }
}

#[then("the store holds {count:usize} task")]
fn store_holds(world: &TaskStoreWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = run_async(world.repository.read_all_tasks()).wrap_err("read all tasks")?;
    eyre::ensure!(
        tasks.len() == count,
        "expected {count} stored tasks, found {}",
        tasks.len()
    );
    Ok(())
}
