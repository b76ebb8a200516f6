//! In-memory `FinancialRecordRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{FinancialRecordRepository, FinancialRecordRepositoryError};
use crate::domain::{FinancialRecord, RecordId, UserId};

use super::lock;

/// Record store keeping rows in insertion order.
///
/// A `Vec` rather than a map, so listing needs no sort; the tracker holds
/// few records per user.
#[derive(Default)]
pub struct InMemoryFinancialRecordRepository {
    records: Mutex<Vec<FinancialRecord>>,
}

impl InMemoryFinancialRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all users.
    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FinancialRecordRepository for InMemoryFinancialRecordRepository {
    async fn insert(&self, record: &FinancialRecord) -> Result<(), FinancialRecordRepositoryError> {
        let mut records = lock(&self.records);
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(FinancialRecordRepositoryError::query(format!(
                "financial record {} already exists",
                record.id()
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &FinancialRecord) -> Result<bool, FinancialRecordRepositoryError> {
        let mut records = lock(&self.records);
        let slot = records
            .iter_mut()
            .find(|existing| existing.id() == record.id() && existing.owner() == record.owner());
        match slot {
            Some(existing) => {
                *existing = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(
        &self,
        id: &RecordId,
        owner: &UserId,
    ) -> Result<bool, FinancialRecordRepositoryError> {
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|record| !(record.id() == *id && record.is_owned_by(owner)));
        Ok(records.len() < before)
    }

    async fn find_by_id(
        &self,
        id: &RecordId,
    ) -> Result<Option<FinancialRecord>, FinancialRecordRepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .find(|record| record.id() == *id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        owner: &UserId,
    ) -> Result<Vec<FinancialRecord>, FinancialRecordRepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .filter(|record| record.is_owned_by(owner))
            .cloned()
            .collect())
    }
}
