//! Add/edit cafe form.

use serde::{Deserialize, Serialize};

use super::{FieldErrors, RuleCode, rules};
use crate::domain::{Cafe, CafeDraft, City, CityCode, DEFAULT_CAFE_IMAGE_URL};

/// One selectable city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityChoice {
    /// Submitted value.
    pub code: CityCode,
    /// Label shown to the user.
    pub name: String,
}

/// The `(code, name)` options for the city field.
///
/// Built per request from the current city rows so newly seeded cities are
/// accepted without restarting anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CityChoices(Vec<CityChoice>);

impl CityChoices {
    /// Choices in the order the cities are given.
    pub fn from_cities(cities: &[City]) -> Self {
        Self(
            cities
                .iter()
                .map(|city| CityChoice {
                    code: city.code().clone(),
                    name: city.name().to_owned(),
                })
                .collect(),
        )
    }

    /// The matching code, if `candidate` is one of the choices.
    pub fn find(&self, candidate: &str) -> Option<&CityCode> {
        self.0
            .iter()
            .map(|choice| &choice.code)
            .find(|code| code.as_ref() == candidate)
    }

    /// Number of choices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no city exists yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw add/edit cafe submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CafeForm {
    pub name: String,
    pub description: String,
    pub url: String,
    pub address: String,
    pub city_code: String,
    pub image_url: String,
}

impl CafeForm {
    /// Seed the edit form from the stored cafe.
    ///
    /// A placeholder image is shown as an empty field, so resubmitting the
    /// form unchanged keeps the placeholder.
    pub fn from_cafe(cafe: &Cafe) -> Self {
        let image_url = if cafe.image_url == DEFAULT_CAFE_IMAGE_URL {
            String::new()
        } else {
            cafe.image_url.clone()
        };
        Self {
            name: cafe.name.clone(),
            description: cafe.description.clone(),
            url: cafe.url.clone(),
            address: cafe.address.clone(),
            city_code: cafe.city_code.to_string(),
            image_url,
        }
    }

    /// Validate against the city choices current for this request.
    pub fn validate(&self, choices: &CityChoices) -> Result<CafeDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = rules::required(&mut errors, "name", &self.name);
        let description = rules::optional(&self.description).unwrap_or_default();
        let url = match rules::optional(&self.url) {
            Some(url) => rules::url(&mut errors, "url", &url).then_some(url),
            None => Some(String::new()),
        };
        let address = rules::required(&mut errors, "address", &self.address);
        let city_code = rules::required(&mut errors, "city_code", &self.city_code).and_then(|raw| {
            let found = choices.find(&raw).cloned();
            if found.is_none() {
                errors.push("city_code", RuleCode::InvalidChoice, "Not a valid choice.");
            }
            found
        });
        let image_url = rules::optional_url(&mut errors, "image_url", &self.image_url);

        match (name, url, address, city_code) {
            (Some(name), Some(url), Some(address), Some(city_code)) if errors.is_empty() => Ok(
                CafeDraft::new(name, description, url, address, city_code, image_url),
            ),
            _ => Err(errors),
        }
    }
}
