//! In-memory adapters for task storage.

mod task;

pub use task::InMemoryTaskRepository;
