//! Driving port for reading a user's financial records.

use async_trait::async_trait;

use crate::domain::{Error, FinancialRecord, UserId};

/// Driving port for financial record reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FinancialRecordQuery: Send + Sync {
    /// Every record owned by `owner` in store order.
    async fn list_records(&self, owner: &UserId) -> Result<Vec<FinancialRecord>, Error>;
}
