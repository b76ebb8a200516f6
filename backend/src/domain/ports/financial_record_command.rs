//! Driving port for financial record mutations.
//!
//! Every request names the acting user; implementations refuse to touch a
//! record that user does not own.

use async_trait::async_trait;

use crate::domain::{Error, RecordDraft, RecordId, UserId};

/// Request to create a record owned by `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecordRequest {
    pub owner: UserId,
    pub draft: RecordDraft,
}

/// Request to overwrite the editable fields of `record_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecordRequest {
    pub owner: UserId,
    pub record_id: RecordId,
    pub draft: RecordDraft,
}

/// Request to remove `record_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRecordRequest {
    pub owner: UserId,
    pub record_id: RecordId,
}

/// Driving port for financial record write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FinancialRecordCommand: Send + Sync {
    /// Persist a new record and return its identifier.
    async fn create_record(&self, request: CreateRecordRequest) -> Result<RecordId, Error>;

    /// Overwrite a record. Unknown or foreign ids fail with `not_found`.
    async fn update_record(&self, request: UpdateRecordRequest) -> Result<(), Error>;

    /// Remove a record. Unknown or foreign ids fail with `not_found`.
    async fn delete_record(&self, request: DeleteRecordRequest) -> Result<(), Error>;
}
