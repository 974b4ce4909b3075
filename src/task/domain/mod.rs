//! Domain model for task storage.
//!
//! Tasks and users are passive data shapes: the repository marshals them to
//! and from relational rows without any lifecycle rules of its own.

mod ids;
mod task;
mod user;

pub use ids::{TaskId, UserId};
pub use task::{PersistedTaskData, Task};
pub use user::User;
