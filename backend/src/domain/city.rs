//! City reference data.
//!
//! Cities are seeded out-of-band and never mutated by the application. Cafes
//! reference them by [`CityCode`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`City::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityValidationError {
    EmptyCode,
    EmptyName,
    InvalidState,
}

impl fmt::Display for CityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "city code must not be empty"),
            Self::EmptyName => write!(f, "city name must not be empty"),
            Self::InvalidState => write!(f, "state must be a two-letter code"),
        }
    }
}

impl std::error::Error for CityValidationError {}

/// Short unique code identifying a city, such as `sf`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityCode(String);

impl CityCode {
    /// Validate and construct a [`CityCode`].
    pub fn new(code: impl Into<String>) -> Result<Self, CityValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(CityValidationError::EmptyCode);
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for CityCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CityCode> for String {
    fn from(value: CityCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for CityCode {
    type Error = CityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A city cafes can belong to.
///
/// ## Invariants
/// - `code` is non-empty.
/// - `name` is non-empty once trimmed.
/// - `state` is exactly two ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    code: CityCode,
    name: String,
    state: String,
}

impl City {
    /// Fallible constructor enforcing the invariants above.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::City;
    ///
    /// let city = City::try_new("sf", "San Francisco", "CA").expect("valid city");
    /// assert_eq!(city.display_with_state(), "San Francisco, CA");
    /// ```
    pub fn try_new(
        code: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<String>,
    ) -> Result<Self, CityValidationError> {
        let code = CityCode::new(code)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CityValidationError::EmptyName);
        }
        let state = state.into();
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CityValidationError::InvalidState);
        }
        Ok(Self { code, name, state })
    }

    /// Short unique code, also the primary key.
    pub fn code(&self) -> &CityCode {
        &self.code
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Two-letter state abbreviation.
    pub fn state(&self) -> &str {
        self.state.as_str()
    }

    /// `"{name}, {state}"`, as shown next to a cafe.
    pub fn display_with_state(&self) -> String {
        format!("{}, {}", self.name, self.state)
    }
}
