//! PostgreSQL-backed `LikeRepository` over the `likes` join table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LikeRepository, LikeRepositoryError};
use crate::domain::{Cafe, CafeId, Like, User, UserId};

use super::diesel_cafe_repository::row_to_cafe;
use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::diesel_user_repository::row_to_user;
use super::models::{CafeRow, LikeRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cafes, likes, users};

/// Diesel-backed [`LikeRepository`] over the `likes` join table.
#[derive(Clone)]
pub struct DieselLikeRepository {
    pool: DbPool,
}

impl DieselLikeRepository {
    /// Repository sharing `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LikeRepositoryError {
    LikeRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> LikeRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => LikeRepositoryError::connection("database connection error"),
        DieselFailure::ForeignKeyViolation(constraint) => {
            LikeRepositoryError::referential_integrity(constraint)
        }
        DieselFailure::UniqueViolation => LikeRepositoryError::query("duplicate like"),
        DieselFailure::Query(message) => LikeRepositoryError::query(message),
    }
}

#[async_trait]
impl LikeRepository for DieselLikeRepository {
    async fn like(&self, like: Like) -> Result<bool, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = diesel::insert_into(likes::table)
            .values(LikeRow::from(like))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted > 0)
    }

    async fn unlike(&self, like: Like) -> Result<bool, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            likes::table.find((like.user_id.get(), like.cafe_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn is_liked(&self, like: Like) -> Result<bool, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            likes::table.find((like.user_id.get(), like.cafe_id.get())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn liked_cafes(&self, user_id: UserId) -> Result<Vec<Cafe>, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CafeRow> = likes::table
            .inner_join(cafes::table)
            .filter(likes::user_id.eq(user_id.get()))
            .order((cafes::name.asc(), cafes::id.asc()))
            .select(CafeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row_to_cafe(row).map_err(|err| LikeRepositoryError::query(err.to_string())))
            .collect()
    }

    async fn liking_users(&self, cafe_id: CafeId) -> Result<Vec<User>, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = likes::table
            .inner_join(users::table)
            .filter(likes::cafe_id.eq(cafe_id.get()))
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row_to_user(row).map_err(|err| LikeRepositoryError::query(err.to_string())))
            .collect()
    }
}
