//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod financial_record_command;
mod financial_record_query;
mod financial_record_repository;
mod login_service;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use financial_record_command::MockFinancialRecordCommand;
pub use financial_record_command::{
    CreateRecordRequest, DeleteRecordRequest, FinancialRecordCommand, UpdateRecordRequest,
};
#[cfg(test)]
pub use financial_record_query::MockFinancialRecordQuery;
pub use financial_record_query::FinancialRecordQuery;
#[cfg(test)]
pub use financial_record_repository::MockFinancialRecordRepository;
pub use financial_record_repository::{FinancialRecordRepository, FinancialRecordRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
