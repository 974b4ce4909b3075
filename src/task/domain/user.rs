//! User reference data.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A user as seen by the task store.
///
/// Reads populate both fields from the `users` table. Writes only look at
/// [`User::id`], so [`User::reference`] is enough when creating or updating
/// tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
}

impl User {
    /// Creates a fully populated user.
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Creates an id-only user for write paths.
    #[must_use]
    pub fn reference(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name; empty for id-only references.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
