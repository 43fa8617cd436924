//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain records re-check
//! the domain invariants and report a row that violates them as an error.

use diesel::prelude::*;

use crate::domain::{
    Cafe, CafeDraft, CafeId, City, CityCode, CityValidationError, HashedPassword, Like, NewUser,
    ProfileUpdate, User, UserId, UserValidationError, Username,
};

use super::schema::{cafes, cities, likes, users};

// ---------------------------------------------------------------------------
// Cities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CityRow {
    pub code: String,
    pub name: String,
    pub state: String,
}

impl TryFrom<CityRow> for City {
    type Error = CityValidationError;

    fn try_from(row: CityRow) -> Result<Self, Self::Error> {
        Self::try_new(row.code, row.name, row.state)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cities)]
pub(crate) struct NewCityRow<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub state: &'a str,
}

impl<'a> From<&'a City> for NewCityRow<'a> {
    fn from(city: &'a City) -> Self {
        Self {
            code: city.code().as_ref(),
            name: city.name(),
            state: city.state(),
        }
    }
}

// ---------------------------------------------------------------------------
// Cafes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cafes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CafeRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub url: String,
    pub address: String,
    pub city_code: String,
    pub image_url: String,
}

impl TryFrom<CafeRow> for Cafe {
    type Error = CityValidationError;

    fn try_from(row: CafeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CafeId::new(row.id),
            name: row.name,
            description: row.description,
            url: row.url,
            address: row.address,
            city_code: CityCode::new(row.city_code)?,
            image_url: row.image_url,
        })
    }
}

/// Every mutable cafe column. Used for inserts and full-replace updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = cafes)]
pub(crate) struct CafeChanges<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub address: &'a str,
    pub city_code: &'a str,
    pub image_url: &'a str,
}

impl<'a> From<&'a CafeDraft> for CafeChanges<'a> {
    fn from(draft: &'a CafeDraft) -> Self {
        Self {
            name: &draft.name,
            description: &draft.description,
            url: &draft.url,
            address: &draft.address,
            city_code: draft.city_code.as_ref(),
            image_url: &draft.image_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub admin: bool,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub image_url: String,
    pub hashed_password: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id),
            username: Username::new(row.username)?,
            admin: row.admin,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            description: row.description,
            image_url: row.image_url,
            password_hash: HashedPassword::from_encoded(row.hashed_password),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub admin: bool,
    pub email: Option<&'a str>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub description: Option<&'a str>,
    pub image_url: &'a str,
    pub hashed_password: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            username: user.username.as_ref(),
            admin: user.admin,
            email: user.email.as_deref(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            description: user.description.as_deref(),
            image_url: &user.image_url,
            hashed_password: user.password_hash.as_encoded(),
        }
    }
}

/// Profile columns. `None` writes `NULL` so a cleared field is replaced.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileChanges<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub description: Option<&'a str>,
    pub email: Option<&'a str>,
    pub image_url: &'a str,
}

impl<'a> From<&'a ProfileUpdate> for ProfileChanges<'a> {
    fn from(update: &'a ProfileUpdate) -> Self {
        Self {
            first_name: &update.first_name,
            last_name: &update.last_name,
            description: update.description.as_deref(),
            email: update.email.as_deref(),
            image_url: &update.image_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = likes)]
pub(crate) struct LikeRow {
    pub user_id: i32,
    pub cafe_id: i32,
}

impl From<Like> for LikeRow {
    fn from(like: Like) -> Self {
        Self {
            user_id: like.user_id.get(),
            cafe_id: like.cafe_id.get(),
        }
    }
}
