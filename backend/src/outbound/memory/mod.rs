//! In-process repository adapters.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. State lives for the lifetime of the process. Each store guards its
//! data with a `std::sync::Mutex` that is never held across an `.await`.

mod financial_record_repository;
mod user_repository;

pub use financial_record_repository::InMemoryFinancialRecordRepository;
pub use user_repository::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock `mutex`, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
