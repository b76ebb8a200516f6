//! Driving port for login and account creation use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials or open accounts without knowing (or importing)
//! the backing infrastructure. HTTP handler tests substitute a mock instead
//! of wiring persistence.

use async_trait::async_trait;

use crate::domain::{AccountRegistration, Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown emails and wrong passwords fail identically with
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized).
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Create an account and return the new user id.
    ///
    /// Fails with [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict)
    /// when the email is already registered.
    async fn register(&self, registration: &AccountRegistration) -> Result<UserId, Error>;

    /// Whether `user_id` still names a stored account.
    ///
    /// Session cookies outlive accounts and in-memory stores, so a signed
    /// user id is only trusted after this check.
    async fn account_exists(&self, user_id: &UserId) -> Result<bool, Error>;
}
