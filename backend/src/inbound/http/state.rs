//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see domain
//! ports, so they can be exercised without a database.

use std::sync::Arc;

use crate::domain::ports::{FinancialRecordCommand, FinancialRecordQuery, LoginService};

/// Dependency bundle for the tracker handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub records: Arc<dyn FinancialRecordCommand>,
    pub records_query: Arc<dyn FinancialRecordQuery>,
}

impl HttpState {
    /// Bundle the ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use savings_tracker::domain::{AccountService, FinancialRecordService};
    /// use savings_tracker::inbound::http::state::HttpState;
    /// use savings_tracker::outbound::memory::{
    ///     InMemoryFinancialRecordRepository, InMemoryUserRepository,
    /// };
    /// use savings_tracker::test_support::{fast_password_hasher, fixture_clock};
    ///
    /// let accounts = AccountService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(fast_password_hasher()),
    ///     fixture_clock(),
    /// );
    /// let records = Arc::new(FinancialRecordService::new(
    ///     Arc::new(InMemoryFinancialRecordRepository::new()),
    ///     fixture_clock(),
    /// ));
    /// let state = HttpState::new(Arc::new(accounts), records.clone(), records);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        records: Arc<dyn FinancialRecordCommand>,
        records_query: Arc<dyn FinancialRecordQuery>,
    ) -> Self {
        Self {
            login,
            records,
            records_query,
        }
    }
}
