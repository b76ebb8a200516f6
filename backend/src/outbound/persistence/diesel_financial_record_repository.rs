//! PostgreSQL-backed `FinancialRecordRepository` implementation.
//!
//! Listing order is `created_at, id`, which matches insertion order for rows
//! written by this service.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FinancialRecordRepository, FinancialRecordRepositoryError};
use crate::domain::{
    FinancialRecord, FinancialRecordParts, Income, RecordDraft, RecordId, RecordName,
    SavingsPercentage, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FinancialRecordRow, FinancialRecordUpdate, NewFinancialRecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::financial_records;

/// Diesel-backed implementation of the financial record repository port.
#[derive(Clone)]
pub struct DieselFinancialRecordRepository {
    pool: DbPool,
}

impl DieselFinancialRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FinancialRecordRepositoryError {
    map_basic_pool_error(error, FinancialRecordRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FinancialRecordRepositoryError {
    map_basic_diesel_error(
        error,
        FinancialRecordRepositoryError::query,
        FinancialRecordRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain record.
fn row_to_record(row: FinancialRecordRow) -> Result<FinancialRecord, FinancialRecordRepositoryError> {
    let FinancialRecordRow {
        id,
        user_id,
        income,
        percentage,
        name,
        created_at,
        updated_at,
    } = row;
    let invalid = |err: crate::domain::RecordValidationError| {
        FinancialRecordRepositoryError::query(format!("stored record {id} is invalid: {err}"))
    };

    let draft = RecordDraft {
        income: Income::new(income).map_err(invalid)?,
        percentage: SavingsPercentage::new(percentage).map_err(invalid)?,
        name: RecordName::new(&name).map_err(invalid)?,
    };

    Ok(FinancialRecord::from_parts(FinancialRecordParts {
        id: RecordId::from_uuid(id),
        owner: UserId::from_uuid(user_id),
        draft,
        created_at,
        updated_at,
    }))
}

#[async_trait]
impl FinancialRecordRepository for DieselFinancialRecordRepository {
    async fn insert(&self, record: &FinancialRecord) -> Result<(), FinancialRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewFinancialRecordRow {
            id: *record.id().as_uuid(),
            user_id: *record.owner().as_uuid(),
            income: record.income().value(),
            percentage: record.percentage().value(),
            name: record.name().as_ref(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        };

        diesel::insert_into(financial_records::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, record: &FinancialRecord) -> Result<bool, FinancialRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = FinancialRecordUpdate {
            income: record.income().value(),
            percentage: record.percentage().value(),
            name: record.name().as_ref(),
            updated_at: record.updated_at(),
        };

        let affected = diesel::update(
            financial_records::table
                .filter(financial_records::id.eq(record.id().as_uuid()))
                .filter(financial_records::user_id.eq(record.owner().as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete(
        &self,
        id: &RecordId,
        owner: &UserId,
    ) -> Result<bool, FinancialRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            financial_records::table
                .filter(financial_records::id.eq(id.as_uuid()))
                .filter(financial_records::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn find_by_id(
        &self,
        id: &RecordId,
    ) -> Result<Option<FinancialRecord>, FinancialRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = financial_records::table
            .filter(financial_records::id.eq(id.as_uuid()))
            .select(FinancialRecordRow::as_select())
            .first::<FinancialRecordRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn list_for_user(
        &self,
        owner: &UserId,
    ) -> Result<Vec<FinancialRecord>, FinancialRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FinancialRecordRow> = financial_records::table
            .filter(financial_records::user_id.eq(owner.as_uuid()))
            .order((financial_records::created_at.asc(), financial_records::id.asc()))
            .select(FinancialRecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }
}
