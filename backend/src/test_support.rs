//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::outbound::security::Argon2PasswordHasher;

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    utc_now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(fixture_timestamp())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// `2026-01-02T03:04:05Z`.
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single() {
        Some(ts) => ts,
        None => DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Boxed [`FixedClock`] at [`fixture_timestamp`].
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::default())
}

/// Argon2id hasher with the smallest legal cost parameters.
///
/// Real Argon2id output, cheap enough for tests that hash many passwords.
pub fn fast_password_hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::with_minimum_cost()
}
