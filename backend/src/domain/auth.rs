//! Authentication primitives such as login credentials and registrations.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use super::{EmailAddress, PersonName, UserValidationError};

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and contains a single `@`.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use savings_tracker::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice@example.com ", "pw1").unwrap();
/// assert_eq!(creds.email().as_ref(), "alice@example.com");
/// assert_eq!(creds.password(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, UserValidationError> {
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address suitable for user lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Everything needed to open a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRegistration {
    credentials: LoginCredentials,
    first_name: PersonName,
    last_name: PersonName,
}

impl AccountRegistration {
    pub fn new(credentials: LoginCredentials, first_name: PersonName, last_name: PersonName) -> Self {
        Self {
            credentials,
            first_name,
            last_name,
        }
    }

    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", UserValidationError::EmptyEmail)]
    #[case("   ", "pw", UserValidationError::EmptyEmail)]
    #[case("alice", "pw", UserValidationError::InvalidEmail)]
    #[case("alice@example.com", "", UserValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  alice@example.com  ", "secret")]
    #[case("bob@example.com", " correct horse battery staple ")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), email.trim());
        assert_eq!(creds.password(), password);
    }
}
