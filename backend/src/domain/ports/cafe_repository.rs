//! Port abstraction for cafe persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Cafe, CafeDraft, CafeId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by cafe repository adapters.
    pub enum CafeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "cafe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "cafe repository query failed: {message}",
        /// No cafe exists with the requested id.
        NotFound { id: i32 } => "cafe {id} not found",
        /// The cafe references a city that does not exist.
        ReferentialIntegrity { message: String } =>
            "cafe references missing data: {message}",
    }
}

/// Storage for cafes. Listing is ordered by name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CafeRepository: Send + Sync {
    /// All cafes ordered by name ascending.
    async fn list(&self) -> Result<Vec<Cafe>, CafeRepositoryError>;

    /// Fetch a cafe by id, failing with `NotFound` when it does not exist.
    async fn get(&self, id: CafeId) -> Result<Cafe, CafeRepositoryError>;

    /// Insert a new cafe and return it with its assigned id.
    async fn insert(&self, draft: &CafeDraft) -> Result<Cafe, CafeRepositoryError>;

    /// Replace every mutable field of an existing cafe.
    async fn update(&self, id: CafeId, draft: &CafeDraft) -> Result<Cafe, CafeRepositoryError>;
}
