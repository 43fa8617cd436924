//! Cafe records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{City, CityCode};

/// Image shown for cafes created without an explicit picture.
pub const DEFAULT_CAFE_IMAGE_URL: &str = "/static/images/default-cafe.jpg";

/// Database-assigned cafe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CafeId(i32);

impl CafeId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CafeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mutable cafe fields, used both for inserts and full-replace updates.
///
/// ## Invariants
/// - `image_url` is never empty: an absent picture becomes
///   [`DEFAULT_CAFE_IMAGE_URL`] when the draft is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CafeDraft {
    pub name: String,
    pub description: String,
    pub url: String,
    pub address: String,
    pub city_code: CityCode,
    pub image_url: String,
}

impl CafeDraft {
    /// Build a draft, substituting the placeholder image when none is given.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{CafeDraft, CityCode, DEFAULT_CAFE_IMAGE_URL};
    ///
    /// let draft = CafeDraft::new(
    ///     "Java",
    ///     "coffee",
    ///     "https://x.com",
    ///     "1 Main St",
    ///     CityCode::new("sf").expect("code"),
    ///     None,
    /// );
    /// assert_eq!(draft.image_url, DEFAULT_CAFE_IMAGE_URL);
    /// ```
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        address: impl Into<String>,
        city_code: CityCode,
        image_url: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            address: address.into(),
            city_code,
            image_url: image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CAFE_IMAGE_URL.to_owned()),
        }
    }
}

/// A persisted cafe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cafe {
    pub id: CafeId,
    pub name: String,
    pub description: String,
    pub url: String,
    pub address: String,
    pub city_code: CityCode,
    pub image_url: String,
}

impl Cafe {
    /// Attach a stored id to a draft.
    pub fn from_draft(id: CafeId, draft: CafeDraft) -> Self {
        let CafeDraft {
            name,
            description,
            url,
            address,
            city_code,
            image_url,
        } = draft;
        Self {
            id,
            name,
            description,
            url,
            address,
            city_code,
            image_url,
        }
    }

    /// The mutable fields of this cafe as a draft.
    pub fn to_draft(&self) -> CafeDraft {
        CafeDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            address: self.address.clone(),
            city_code: self.city_code.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// A cafe together with the city it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeWithCity {
    pub cafe: Cafe,
    pub city: City,
}

impl CafeWithCity {
    /// Return `"{city}, {state}"` for the cafe.
    pub fn city_state(&self) -> String {
        self.city.display_with_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sf() -> CityCode {
        CityCode::new("sf").expect("city code")
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn blank_image_falls_back_to_placeholder(#[case] image_url: Option<String>) {
        let draft = CafeDraft::new("Java", "", "", "1 Main St", sf(), image_url);
        assert_eq!(draft.image_url, DEFAULT_CAFE_IMAGE_URL);
    }

    #[test]
    fn keeps_explicit_image() {
        let draft = CafeDraft::new(
            "Java",
            "",
            "",
            "1 Main St",
            sf(),
            Some("https://img.example/java.png".to_owned()),
        );
        assert_eq!(draft.image_url, "https://img.example/java.png");
    }

    #[test]
    fn city_state_uses_referenced_city() {
        let draft = CafeDraft::new("Java", "coffee", "https://x.com", "1 Main St", sf(), None);
        let cafe = Cafe::from_draft(CafeId::new(7), draft.clone());
        assert_eq!(cafe.to_draft(), draft);

        let joined = CafeWithCity {
            cafe,
            city: City::try_new("sf", "San Francisco", "CA").expect("city"),
        };
        assert_eq!(joined.city_state(), "San Francisco, CA");
    }
}
