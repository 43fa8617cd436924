//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, ProfileUpdate, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// No user exists with the requested id.
        NotFound { id: i32 } => "user {id} not found",
        /// The username is already taken. Raised by the storage constraint, so
        /// it also covers concurrent signups that both passed a pre-check.
        DuplicateUsername { username: String } => "username already exists: {username}",
    }
}

/// Storage for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id, failing with `NotFound` when it does not exist.
    async fn get(&self, id: UserId) -> Result<User, UserRepositoryError>;

    /// Look up exactly one user by (case-sensitive) username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a registered user and return it with its assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Replace every editable profile field of an existing user.
    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, UserRepositoryError>;
}
