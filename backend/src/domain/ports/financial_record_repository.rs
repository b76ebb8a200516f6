//! Port for financial record persistence.

use async_trait::async_trait;

use crate::domain::{FinancialRecord, RecordId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by financial record repository adapters.
    pub enum FinancialRecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "financial record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "financial record repository query failed: {message}",
    }
}

/// Port for reading and writing financial records.
///
/// Mutations are scoped to the owning user: `update` and `delete` only touch
/// a row whose id and owner both match, and report whether one did.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FinancialRecordRepository: Send + Sync {
    /// Persist a new record.
    async fn insert(&self, record: &FinancialRecord) -> Result<(), FinancialRecordRepositoryError>;

    /// Overwrite the editable fields and `updated_at` of an existing record.
    async fn update(&self, record: &FinancialRecord) -> Result<bool, FinancialRecordRepositoryError>;

    /// Remove the record `id` owned by `owner`.
    async fn delete(
        &self,
        id: &RecordId,
        owner: &UserId,
    ) -> Result<bool, FinancialRecordRepositoryError>;

    /// Find a record by id, whoever owns it.
    async fn find_by_id(
        &self,
        id: &RecordId,
    ) -> Result<Option<FinancialRecord>, FinancialRecordRepositoryError>;

    /// All records owned by `owner`, oldest first.
    async fn list_for_user(
        &self,
        owner: &UserId,
    ) -> Result<Vec<FinancialRecord>, FinancialRecordRepositoryError>;
}
