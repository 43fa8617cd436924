//! Conversions from port errors into transport-agnostic domain errors.
//!
//! Connection failures surface as `service_unavailable`. Constraint
//! violations that validation should have prevented (a dangling city code,
//! for example) are fatal and surface as redacted internal errors.

use crate::domain::Error;

use super::{CafeRepositoryError, CityRepositoryError, LikeRepositoryError, UserRepositoryError};

impl From<CityRepositoryError> for Error {
    fn from(error: CityRepositoryError) -> Self {
        match error {
            CityRepositoryError::Connection { message } => Error::service_unavailable(message),
            CityRepositoryError::Query { message } => Error::internal(message),
            CityRepositoryError::DuplicateCode { code } => {
                Error::conflict(format!("city code already exists: {code}"))
            }
        }
    }
}

impl From<CafeRepositoryError> for Error {
    fn from(error: CafeRepositoryError) -> Self {
        match error {
            CafeRepositoryError::Connection { message } => Error::service_unavailable(message),
            CafeRepositoryError::NotFound { .. } => Error::not_found("cafe not found"),
            CafeRepositoryError::Query { message }
            | CafeRepositoryError::ReferentialIntegrity { message } => Error::internal(message),
        }
    }
}

impl From<UserRepositoryError> for Error {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::Connection { message } => Error::service_unavailable(message),
            UserRepositoryError::Query { message } => Error::internal(message),
            UserRepositoryError::NotFound { .. } => Error::not_found("user not found"),
            UserRepositoryError::DuplicateUsername { .. } => {
                Error::conflict("username already taken")
            }
        }
    }
}

impl From<LikeRepositoryError> for Error {
    fn from(error: LikeRepositoryError) -> Self {
        match error {
            LikeRepositoryError::Connection { message } => Error::service_unavailable(message),
            LikeRepositoryError::Query { message }
            | LikeRepositoryError::ReferentialIntegrity { message } => Error::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(CafeRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(CafeRepositoryError::query("bad sql"), ErrorCode::InternalError)]
    #[case(CafeRepositoryError::not_found(9), ErrorCode::NotFound)]
    #[case(
        CafeRepositoryError::referential_integrity("city nyc"),
        ErrorCode::InternalError
    )]
    fn cafe_errors_map_to_codes(#[case] error: CafeRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(Error::from(error).code(), code);
    }

    #[rstest]
    #[case(UserRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(UserRepositoryError::not_found(1), ErrorCode::NotFound)]
    #[case(UserRepositoryError::duplicate_username("alice"), ErrorCode::Conflict)]
    fn user_errors_map_to_codes(#[case] error: UserRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(Error::from(error).code(), code);
    }

    #[test]
    fn not_found_message_does_not_echo_ids() {
        let error = Error::from(CafeRepositoryError::not_found(12345));
        assert!(!error.message().contains("12345"));
    }
}
