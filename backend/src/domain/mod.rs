//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed records of the cafe directory (cities,
//! cafes, users and likes), the authentication service, the form schemas and
//! the repository ports the adapters implement. Nothing in here knows about
//! HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: error payload and stable error identifier.
//! - City, Cafe, User, Like: stored records and their ids.
//! - AuthService: registration, credential checks and session identity lookup.
//! - forms: the four input schemas and their field errors.
//! - ports: repository traits for the persistence adapters.

pub mod auth;
pub mod auth_service;
pub mod cafe;
pub mod city;
pub mod error;
pub mod forms;
pub mod like;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, PasswordHasher, Registration};
pub use self::auth_service::{AuthOutcome, AuthService, SignupError};
pub use self::cafe::{Cafe, CafeDraft, CafeId, CafeWithCity, DEFAULT_CAFE_IMAGE_URL};
pub use self::city::{City, CityCode, CityValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::like::Like;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DEFAULT_USER_IMAGE_URL, FIRST_NAME_MAX, HashedPassword, LAST_NAME_MAX, NewUser, ProfileUpdate,
    User, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("cafe not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
