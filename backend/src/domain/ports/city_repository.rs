//! Port abstraction for city reference data.
use async_trait::async_trait;

use crate::domain::{City, CityCode};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by city repository adapters.
    pub enum CityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "city repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "city repository query failed: {message}",
        /// A city with the same code already exists.
        DuplicateCode { code: String } => "city code already exists: {code}",
    }
}

/// Read access to cities plus the seeding insert used at startup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// All cities ordered by name.
    async fn list(&self) -> Result<Vec<City>, CityRepositoryError>;

    /// Fetch a city by code.
    async fn find(&self, code: &CityCode) -> Result<Option<City>, CityRepositoryError>;

    /// Insert a city. Only seeding calls this; the HTTP surface never does.
    async fn insert(&self, city: &City) -> Result<(), CityRepositoryError>;
}
