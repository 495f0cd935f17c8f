//! User list use-case service.
//!
//! # Invariants
//! - Every mutation is followed by a full re-fetch; the returned snapshot is
//!   what the caller should render.
//! - The service never caches rows between calls.

use crate::model::user::{UserId, UserRecord};
use crate::repo::user_repo::{StoreResult, UserRepository};

/// Wraps a repository with the refresh-after-mutation contract.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Initial list load.
    pub fn load(&self) -> StoreResult<Vec<UserRecord>> {
        self.repo.fetch_all_users()
    }

    /// Inserts a new user and returns its id together with the refreshed list.
    pub fn add_user(
        &self,
        name: &str,
        age: i64,
        email: &str,
    ) -> StoreResult<(UserId, Vec<UserRecord>)> {
        let id = self.repo.insert_user(name, age, email)?;
        Ok((id, self.repo.fetch_all_users()?))
    }

    /// Saves an edit in progress and returns the refreshed list.
    ///
    /// Editing a user that was deleted meanwhile succeeds without effect.
    pub fn edit_user(
        &self,
        id: UserId,
        name: &str,
        age: i64,
        email: &str,
    ) -> StoreResult<Vec<UserRecord>> {
        self.repo.update_user(id, name, age, email)?;
        self.repo.fetch_all_users()
    }

    /// Deletes a confirmed user and returns the refreshed list.
    pub fn remove_user(&self, id: UserId) -> StoreResult<Vec<UserRecord>> {
        self.repo.delete_user(id)?;
        self.repo.fetch_all_users()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_inner(self) -> R {
        self.repo
    }
}
