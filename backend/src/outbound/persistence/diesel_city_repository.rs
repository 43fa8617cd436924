//! PostgreSQL-backed `CityRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CityRepository, CityRepositoryError};
use crate::domain::{City, CityCode};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CityRow, NewCityRow};
use super::pool::{DbPool, PoolError};
use super::schema::cities;

/// Diesel-backed [`CityRepository`].
#[derive(Clone)]
pub struct DieselCityRepository {
    pool: DbPool,
}

impl DieselCityRepository {
    /// Repository sharing `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CityRepositoryError {
    CityRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CityRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => CityRepositoryError::connection("database connection error"),
        DieselFailure::UniqueViolation => CityRepositoryError::query("duplicate city"),
        DieselFailure::ForeignKeyViolation(constraint) => CityRepositoryError::query(constraint),
        DieselFailure::Query(message) => CityRepositoryError::query(message),
    }
}

fn row_to_city(row: CityRow) -> Result<City, CityRepositoryError> {
    let code = row.code.clone();
    City::try_from(row)
        .map_err(|err| CityRepositoryError::query(format!("invalid city row {code}: {err}")))
}

#[async_trait]
impl CityRepository for DieselCityRepository {
    async fn list(&self) -> Result<Vec<City>, CityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CityRow> = cities::table
            .order(cities::name.asc())
            .select(CityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_city).collect()
    }

    async fn find(&self, code: &CityCode) -> Result<Option<City>, CityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CityRow> = cities::table
            .filter(cities::code.eq(code.as_ref()))
            .select(CityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_city).transpose()
    }

    async fn insert(&self, city: &City) -> Result<(), CityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(cities::table)
            .values(NewCityRow::from(city))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| match classify_diesel_error(err) {
                DieselFailure::UniqueViolation => {
                    CityRepositoryError::duplicate_code(city.code().as_ref())
                }
                DieselFailure::Connection => {
                    CityRepositoryError::connection("database connection error")
                }
                DieselFailure::ForeignKeyViolation(constraint) => {
                    CityRepositoryError::query(constraint)
                }
                DieselFailure::Query(message) => CityRepositoryError::query(message),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, CityRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("gone".to_owned()),
        ));
        assert!(matches!(err, CityRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn invalid_row_is_a_query_error() {
        let row = CityRow {
            code: "sf".into(),
            name: "San Francisco".into(),
            state: "Calif".into(),
        };
        assert!(matches!(row_to_city(row), Err(CityRepositoryError::Query { .. })));
    }
}
