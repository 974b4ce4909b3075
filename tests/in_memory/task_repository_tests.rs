//! In-memory integration tests for the task repository port.

use super::helpers::{SEEDED_TASK_COUNT, cook_meth, seeded_repository};
use rstest::rstest;
use tasks::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId, User},
    ports::{TaskRepository, TaskRepositoryError, WriteOutcome},
};

/// Asserts the tasks carry exactly the expected identifiers, in order.
///
/// # Errors
///
/// Returns an error if the identifiers differ.
fn assert_task_ids(found: &[Task], expected: &[i32]) -> Result<(), eyre::Report> {
    let ids: Vec<i32> = found.iter().map(|task| task.id().into_inner()).collect();
    eyre::ensure!(ids == expected, "expected task ids {expected:?}, found {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_repository_reads_no_tasks() {
    let repository = InMemoryTaskRepository::new();
    let tasks = repository
        .read_all_tasks()
        .await
        .expect("read should succeed");
    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_create_is_additive(
    #[future] seeded_repository: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    let repository = seeded_repository.await;
    let batch = vec![
        Task::new(User::reference(1), User::reference(2), "Test title1", "Test content1"),
        Task::new(User::reference(3), User::reference(4), "Test title2", "Test content2")
            .with_opened(1)
            .with_closed(2),
    ];

    repository.create_tasks(&batch).await?;

    let tasks = repository.read_all_tasks().await?;
    eyre::ensure!(
        tasks.len() == SEEDED_TASK_COUNT + batch.len(),
        "expected {} tasks, found {}",
        SEEDED_TASK_COUNT + batch.len(),
        tasks.len()
    );
    assert_task_ids(&tasks, &[1, 2, 3, 4, 5, 6])
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_with_unknown_author_leaves_store_unchanged(
    #[future] seeded_repository: InMemoryTaskRepository,
) {
    let repository = seeded_repository.await;
    let batch = vec![
        Task::new(User::reference(1), User::reference(2), "Valid", "Valid"),
        Task::new(User::reference(42), User::reference(2), "Invalid", "Invalid"),
    ];

    let result = repository.create_tasks(&batch).await;
    let tasks = repository
        .read_all_tasks()
        .await
        .expect("read should succeed");

    assert!(matches!(&result, Err(TaskRepositoryError::Statement(_))));
    assert!(result.is_err_and(|err| err.is_foreign_key_violation()));
    assert_eq!(tasks.len(), SEEDED_TASK_COUNT);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn read_by_id_joins_user_names(#[future] seeded_repository: InMemoryTaskRepository) {
    let repository = seeded_repository.await;

    let found = repository
        .read_task_by_id(TaskId::new(1))
        .await
        .expect("read should succeed");
    let missing = repository
        .read_task_by_id(TaskId::new(10_001))
        .await
        .expect("missing id is not an error");

    assert_eq!(found, vec![cook_meth()]);
    assert!(missing.is_empty());
}

#[rstest]
#[case("meth", &[1, 2, 3])]
#[case("money", &[4])]
#[case("unknown-label", &[])]
#[tokio::test(flavor = "multi_thread")]
async fn read_by_tag_returns_exactly_the_tagged_tasks(
    #[future] seeded_repository: InMemoryTaskRepository,
    #[case] tag: &str,
    #[case] expected: &[i32],
) -> Result<(), eyre::Report> {
    let repository = seeded_repository.await;
    let tasks = repository.read_tasks_by_tag(tag).await?;
    assert_task_ids(&tasks, expected)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_then_read_round_trips(#[future] seeded_repository: InMemoryTaskRepository) {
    let repository = seeded_repository.await;
    let updated = Task::new(
        User::new(1, "Walter White"),
        User::new(2, "Jesse Pinkman"),
        "Test update title",
        "Test update content",
    )
    .with_id(TaskId::new(1));

    let outcome = repository
        .update_task_by_id(TaskId::new(1), &updated)
        .await
        .expect("update should succeed");
    let found = repository
        .read_task_by_id(TaskId::new(1))
        .await
        .expect("read should succeed");

    assert_eq!(outcome, WriteOutcome::Applied);
    assert_eq!(found, vec![updated]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_ignores_the_id_inside_the_task(
    #[future] seeded_repository: InMemoryTaskRepository,
) {
    let repository = seeded_repository.await;
    let payload = cook_meth().with_id(TaskId::new(3));

    let outcome = repository
        .update_task_by_id(TaskId::new(2), &payload)
        .await
        .expect("update should succeed");
    let second = repository
        .read_task_by_id(TaskId::new(2))
        .await
        .expect("read should succeed");

    assert_eq!(outcome, WriteOutcome::Applied);
    assert_eq!(second, vec![cook_meth().with_id(TaskId::new(2))]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_task_reports_not_found(
    #[future] seeded_repository: InMemoryTaskRepository,
) {
    let repository = seeded_repository.await;

    let outcome = repository
        .update_task_by_id(TaskId::new(10_001), &cook_meth())
        .await
        .expect("update should succeed");

    assert_eq!(outcome, WriteOutcome::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_drops_task_and_associations(
    #[future] seeded_repository: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    let repository = seeded_repository.await;

    let first = repository.delete_task_by_id(TaskId::new(1)).await?;
    let second = repository.delete_task_by_id(TaskId::new(1)).await?;

    eyre::ensure!(first == WriteOutcome::Applied, "first delete should apply");
    eyre::ensure!(second == WriteOutcome::NotFound, "second delete finds nothing");
    eyre::ensure!(
        repository.read_task_by_id(TaskId::new(1)).await?.is_empty(),
        "deleted task must not be readable"
    );
    eyre::ensure!(
        repository.association_count(TaskId::new(1))? == 0,
        "associations must be removed with the task"
    );
    assert_task_ids(&repository.read_tasks_by_tag("meth").await?, &[2, 3])
}
