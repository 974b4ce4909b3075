//! Tasks: `PostgreSQL` storage for a task tracker.
//!
//! This crate provides the data-access layer for tasks with authors,
//! assignees, open/close timestamps and tag labels. Every operation runs
//! against a pooled connection; writes execute inside a transaction that
//! commits or rolls back as one unit.
//!
//! # Architecture
//!
//! The task module follows hexagonal architecture principles:
//!
//! - **Domain**: Plain task and user values with no infrastructure dependencies
//! - **Ports**: The [`task::ports::TaskRepository`] trait and its error type
//! - **Adapters**: `PostgreSQL` (Diesel + r2d2) and in-memory implementations
//!
//! # Modules
//!
//! - [`config`]: Connection configuration read from the environment
//! - [`task`]: Task domain, repository port and adapters

pub mod config;
pub mod task;
