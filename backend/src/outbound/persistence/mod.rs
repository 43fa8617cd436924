//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain records. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Storage-enforced invariants**: username uniqueness, the cafe → city
//!   foreign key and the composite like key are constraints in the schema, so
//!   they hold under concurrent requests.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselCafeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/cafes")).await?;
//! let cafes = DieselCafeRepository::new(pool);
//! ```

mod diesel_cafe_repository;
mod diesel_city_repository;
mod diesel_error_mapping;
mod diesel_like_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cafe_repository::DieselCafeRepository;
pub use diesel_city_repository::DieselCityRepository;
pub use diesel_like_repository::DieselLikeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
