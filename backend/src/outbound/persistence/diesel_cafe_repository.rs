//! PostgreSQL-backed `CafeRepository`.
//!
//! The `cafes.city_code` foreign key is the authority on city validity; a
//! violation surfaces as `ReferentialIntegrity` even if the form pre-check
//! passed in a racing request.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CafeRepository, CafeRepositoryError};
use crate::domain::{Cafe, CafeDraft, CafeId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CafeChanges, CafeRow};
use super::pool::{DbPool, PoolError};
use super::schema::cafes;

/// Diesel-backed [`CafeRepository`].
#[derive(Clone)]
pub struct DieselCafeRepository {
    pool: DbPool,
}

impl DieselCafeRepository {
    /// Repository sharing `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CafeRepositoryError {
    CafeRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CafeRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => CafeRepositoryError::connection("database connection error"),
        DieselFailure::ForeignKeyViolation(constraint) => {
            CafeRepositoryError::referential_integrity(constraint)
        }
        DieselFailure::UniqueViolation => CafeRepositoryError::query("duplicate cafe"),
        DieselFailure::Query(message) => CafeRepositoryError::query(message),
    }
}

pub(super) fn row_to_cafe(row: CafeRow) -> Result<Cafe, CafeRepositoryError> {
    let id = row.id;
    Cafe::try_from(row)
        .map_err(|err| CafeRepositoryError::query(format!("invalid cafe row {id}: {err}")))
}

#[async_trait]
impl CafeRepository for DieselCafeRepository {
    async fn list(&self) -> Result<Vec<Cafe>, CafeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CafeRow> = cafes::table
            .order((cafes::name.asc(), cafes::id.asc()))
            .select(CafeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_cafe).collect()
    }

    async fn get(&self, id: CafeId) -> Result<Cafe, CafeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CafeRow> = cafes::table
            .find(id.get())
            .select(CafeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_cafe)
            .transpose()?
            .ok_or_else(|| CafeRepositoryError::not_found(id.get()))
    }

    async fn insert(&self, draft: &CafeDraft) -> Result<Cafe, CafeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CafeRow = diesel::insert_into(cafes::table)
            .values(CafeChanges::from(draft))
            .returning(CafeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_cafe(row)
    }

    async fn update(&self, id: CafeId, draft: &CafeDraft) -> Result<Cafe, CafeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CafeRow> = diesel::update(cafes::table.find(id.get()))
            .set(CafeChanges::from(draft))
            .returning(CafeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_cafe)
            .transpose()?
            .ok_or_else(|| CafeRepositoryError::not_found(id.get()))
    }
}
