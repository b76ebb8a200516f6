//! Financial record domain services.
//!
//! These services implement the record command and query driving ports. All
//! mutations are scoped to the acting user: a record owned by someone else is
//! reported exactly like a missing one.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateRecordRequest, DeleteRecordRequest, FinancialRecordCommand, FinancialRecordQuery,
    FinancialRecordRepository, FinancialRecordRepositoryError, UpdateRecordRequest,
};
use crate::domain::{Error, FinancialRecord, RecordId, UserId};

fn map_repository_error(error: FinancialRecordRepositoryError) -> Error {
    match error {
        FinancialRecordRepositoryError::Connection { message } => Error::service_unavailable(
            format!("financial record repository unavailable: {message}"),
        ),
        FinancialRecordRepositoryError::Query { message } => {
            Error::internal(format!("financial record repository error: {message}"))
        }
    }
}

fn record_not_found(id: &RecordId) -> Error {
    Error::not_found(format!("financial record {id} not found"))
}

/// Financial record service implementing the command and query ports.
#[derive(Clone)]
pub struct FinancialRecordService<R> {
    records: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FinancialRecordService<R> {
    /// Create a service over the record repository.
    pub fn new(records: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { records, clock }
    }
}

#[async_trait]
impl<R> FinancialRecordCommand for FinancialRecordService<R>
where
    R: FinancialRecordRepository,
{
    async fn create_record(&self, request: CreateRecordRequest) -> Result<RecordId, Error> {
        let CreateRecordRequest { owner, draft } = request;
        let record = FinancialRecord::create(RecordId::random(), owner, draft, self.clock.utc());

        self.records
            .insert(&record)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %record.owner(), record_id = %record.id(), "financial record created");
        Ok(record.id())
    }

    async fn update_record(&self, request: UpdateRecordRequest) -> Result<(), Error> {
        let UpdateRecordRequest {
            owner,
            record_id,
            draft,
        } = request;

        let existing = self
            .records
            .find_by_id(&record_id)
            .await
            .map_err(map_repository_error)?
            .filter(|record| record.is_owned_by(&owner))
            .ok_or_else(|| record_not_found(&record_id))?;

        let revised = existing.revise(draft, self.clock.utc());
        let updated = self
            .records
            .update(&revised)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            // Deleted between the lookup and the write.
            debug!(record_id = %record_id, "financial record vanished during update");
            return Err(record_not_found(&record_id));
        }

        info!(user_id = %owner, record_id = %record_id, "financial record updated");
        Ok(())
    }

    async fn delete_record(&self, request: DeleteRecordRequest) -> Result<(), Error> {
        let DeleteRecordRequest { owner, record_id } = request;
        let deleted = self
            .records
            .delete(&record_id, &owner)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(record_not_found(&record_id));
        }

        info!(user_id = %owner, record_id = %record_id, "financial record deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> FinancialRecordQuery for FinancialRecordService<R>
where
    R: FinancialRecordRepository,
{
    async fn list_records(&self, owner: &UserId) -> Result<Vec<FinancialRecord>, Error> {
        self.records
            .list_for_user(owner)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "financial_record_service_tests.rs"]
mod tests;
