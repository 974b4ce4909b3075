//! Task storage for the task tracker.
//!
//! Tasks carry an author, an assignee, open/close timestamps and tag labels.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
