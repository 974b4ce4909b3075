//! `PostgreSQL` adapters for task storage.

mod models;
mod queries;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool};
