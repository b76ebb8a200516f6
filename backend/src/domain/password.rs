//! Stored password hashes.

use std::fmt;

/// Validation errors for stored password hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashValidationError {
    #[error("password hash must not be empty")]
    Empty,
    #[error("password hash must be a PHC string")]
    NotPhc,
}

/// PHC-formatted password hash, e.g. `$argon2id$v=19$m=...`.
///
/// The value is opaque to the domain; only a
/// [`PasswordHasher`](super::ports::PasswordHasher) interprets it. `Debug`
/// output is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string produced by a hasher or loaded from storage.
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordHashValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(PasswordHashValidationError::Empty);
        }
        if !raw.starts_with('$') {
            return Err(PasswordHashValidationError::NotPhc);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
