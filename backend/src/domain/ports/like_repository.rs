//! Port abstraction for the user/cafe likes join table.
use async_trait::async_trait;

use crate::domain::{Cafe, CafeId, Like, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by like repository adapters.
    pub enum LikeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "like repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "like repository query failed: {message}",
        /// The like references a user or cafe that does not exist.
        ReferentialIntegrity { message: String } =>
            "like references missing data: {message}",
    }
}

/// Many-to-many relationship between users and cafes.
///
/// `like` and `unlike` are idempotent: liking twice leaves one row, unliking a
/// cafe that was never liked is not an error. The boolean result reports
/// whether a row changed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn like(&self, like: Like) -> Result<bool, LikeRepositoryError>;

    async fn unlike(&self, like: Like) -> Result<bool, LikeRepositoryError>;

    async fn is_liked(&self, like: Like) -> Result<bool, LikeRepositoryError>;

    /// Cafes liked by the user, ordered by name.
    async fn liked_cafes(&self, user_id: UserId) -> Result<Vec<Cafe>, LikeRepositoryError>;

    /// Users who like the cafe, ordered by username.
    async fn liking_users(&self, cafe_id: CafeId) -> Result<Vec<User>, LikeRepositoryError>;
}
