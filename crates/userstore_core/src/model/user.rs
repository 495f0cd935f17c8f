//! User record model.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on insert.
//! - Records returned by reads always carry `Some(id)`.
//! - `age` and `email` are stored as given; range and format checks belong to callers.

use serde::{Deserialize, Serialize};

/// Store-assigned row identifier (`Users.id`).
pub type UserId = i64;

/// One user entry as persisted in the `Users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Assigned by auto-increment on insert, immutable afterwards.
    pub id: Option<UserId>,
    pub name: String,
    /// Callers conventionally keep this in `0..=100`.
    pub age: i64,
    pub email: String,
}

impl UserRecord {
    /// Creates an in-memory record that has not been persisted yet.
    pub fn new(name: impl Into<String>, age: i64, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    /// Creates a record for a row that already exists in the store.
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        age: i64,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, age, email)
        }
    }

    /// Returns whether the store has assigned an id to this record.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
