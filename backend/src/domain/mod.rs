//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! layers, plus the services implementing the driving ports. Types are
//! immutable once validated and document their invariants in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User, EmailAddress, PersonName: account holders.
//! - FinancialRecord, Income, SavingsPercentage, RecordName: savings tactics
//!   and the derived transfer amount.
//! - AccountService, FinancialRecordService: port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod financial_record;
pub mod financial_record_service;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{AccountRegistration, LoginCredentials};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::financial_record::{
    FinancialRecord, FinancialRecordParts, INCOME_SCALE, Income, PERCENTAGE_SCALE,
    RECORD_NAME_MAX, RecordDraft, RecordId, RecordName, RecordValidationError,
    SavingsPercentage, transfer_amount,
};
pub use self::financial_record_service::FinancialRecordService;
pub use self::password::{PasswordHash, PasswordHashValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_MAX, EmailAddress, PERSON_NAME_MAX, PersonName, User, UserDraft, UserId,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use savings_tracker::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
