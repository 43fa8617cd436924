//! PostgreSQL-backed `UserRepository`.
//!
//! Username uniqueness is enforced by the `users_username_key` constraint, so
//! two concurrent signups for the same name cannot both commit.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, ProfileUpdate, User, UserId, Username};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, ProfileChanges, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Repository sharing `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => UserRepositoryError::connection("database connection error"),
        DieselFailure::UniqueViolation => UserRepositoryError::query("unique constraint violated"),
        DieselFailure::ForeignKeyViolation(constraint) => UserRepositoryError::query(constraint),
        DieselFailure::Query(message) => UserRepositoryError::query(message),
    }
}

pub(super) fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let id = row.id;
    User::try_from(row)
        .map_err(|err| UserRepositoryError::query(format!("invalid user row {id}: {err}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get(&self, id: UserId) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user)
            .transpose()?
            .ok_or_else(|| UserRepositoryError::not_found(id.get()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match classify_diesel_error(err) {
                DieselFailure::UniqueViolation => {
                    UserRepositoryError::duplicate_username(user.username.as_ref())
                }
                DieselFailure::Connection => {
                    UserRepositoryError::connection("database connection error")
                }
                DieselFailure::ForeignKeyViolation(constraint) => {
                    UserRepositoryError::query(constraint)
                }
                DieselFailure::Query(message) => UserRepositoryError::query(message),
            })?;

        row_to_user(row)
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(ProfileChanges::from(update))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user)
            .transpose()?
            .ok_or_else(|| UserRepositoryError::not_found(id.get()))
    }
}
