//! Account services: login and account creation.
//!
//! Implements the [`LoginService`] driving port on top of the user repository
//! and password hasher ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccountRegistration, Error, LoginCredentials, PasswordHash, User, UserDraft, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const EMAIL_TAKEN: &str = "email already in use";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_TAKEN),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Login and registration backed by a [`UserRepository`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    /// Create a service over the given user store and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<dyn PasswordHasher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Run a hasher operation on the blocking pool.
    async fn with_hasher<T, F>(&self, op: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&dyn PasswordHasher) -> Result<T, PasswordHasherError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || op(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let password = Zeroizing::new(credentials.password().to_owned());
        let stored = user.password_hash().clone();
        let matches = self
            .with_hasher(move |hasher| hasher.verify(password.as_str(), &stored))
            .await?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id(), "user authenticated");
        Ok(user.id().clone())
    }

    async fn register(&self, registration: &AccountRegistration) -> Result<UserId, Error> {
        let email = registration.credentials().email();
        let existing = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            debug!("registration rejected: email already registered");
            return Err(Error::conflict(EMAIL_TAKEN));
        }

        let password = Zeroizing::new(registration.credentials().password().to_owned());
        let password_hash: PasswordHash =
            self.with_hasher(move |hasher| hasher.hash(password.as_str())).await?;

        let now = self.clock.utc();
        let user = User::new(UserDraft {
            id: UserId::random(),
            email: email.clone(),
            password_hash,
            first_name: registration.first_name().clone(),
            last_name: registration.last_name().clone(),
            created_at: now,
            updated_at: now,
        });

        // The store's unique index catches a concurrent registration that
        // slipped past the lookup above.
        self.users.insert(&user).await.map_err(map_user_error)?;

        info!(user_id = %user.id(), "account created");
        Ok(user.id().clone())
    }

    async fn account_exists(&self, user_id: &UserId) -> Result<bool, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?;
        Ok(user.is_some())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
