//! Likes join users to the cafes they like.

use serde::{Deserialize, Serialize};

use super::{CafeId, UserId};

/// A user liking a cafe. The pair is the identity: there is at most one like
/// per user and cafe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Like {
    pub user_id: UserId,
    pub cafe_id: CafeId,
}

impl Like {
    /// Like of `cafe_id` by `user_id`.
    pub const fn new(user_id: UserId, cafe_id: CafeId) -> Self {
        Self { user_id, cafe_id }
    }
}
