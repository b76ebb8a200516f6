//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use savings_tracker::domain::ports::{
    FinancialRecordRepository, PasswordHasher, UserRepository,
};
use savings_tracker::domain::{AccountService, FinancialRecordService};
use savings_tracker::inbound::http::state::HttpState;
use savings_tracker::outbound::memory::{
    InMemoryFinancialRecordRepository, InMemoryUserRepository,
};
use savings_tracker::outbound::persistence::{
    DieselFinancialRecordRepository, DieselUserRepository,
};
use savings_tracker::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Assemble the account and record services over one pair of repositories.
fn build_tracker_state<U, R>(
    users: U,
    records: R,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    R: FinancialRecordRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        Arc::new(users),
        hasher,
        Arc::clone(&clock),
    ));
    let records = Arc::new(FinancialRecordService::new(Arc::new(records), clock));
    HttpState::new(accounts, records.clone(), records)
}

/// Build the shared HTTP state, backed by PostgreSQL when a pool is
/// configured and by process memory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    build_http_state_with(
        config,
        Arc::new(Argon2PasswordHasher::default()),
        Arc::new(DefaultClock),
    )
}

fn build_http_state_with(
    config: &ServerConfig,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_tracker_state(
            DieselUserRepository::new(pool.clone()),
            DieselFinancialRecordRepository::new(pool.clone()),
            hasher,
            clock,
        ),
        None => {
            warn!("no database configured; accounts and records are kept in memory");
            build_tracker_state(
                InMemoryUserRepository::new(),
                InMemoryFinancialRecordRepository::new(),
                hasher,
                clock,
            )
        }
    };
    web::Data::new(state)
}
