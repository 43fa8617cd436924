//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Every repository port has a Diesel adapter for PostgreSQL and an in-memory
//! adapter with the same constraint semantics for tests and local runs.

mod macros;
pub(crate) use macros::define_port_error;

mod cafe_repository;
mod city_repository;
mod error_mapping;
mod like_repository;
mod user_repository;

#[cfg(test)]
pub use cafe_repository::MockCafeRepository;
pub use cafe_repository::{CafeRepository, CafeRepositoryError};
#[cfg(test)]
pub use city_repository::MockCityRepository;
pub use city_repository::{CityRepository, CityRepositoryError};
#[cfg(test)]
pub use like_repository::MockLikeRepository;
pub use like_repository::{LikeRepository, LikeRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
