//! Port contracts for task storage.
//!
//! Ports define infrastructure-agnostic interfaces so alternative backends or
//! test doubles can stand in for `PostgreSQL` without touching call sites.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, WriteOutcome};
