//! HTTP inbound adapter.
//!
//! One tracker route plus health checks. Handlers translate forms and
//! sessions into domain port calls and map domain errors back to HTTP.

pub mod actions;
pub mod app;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tracker;
pub mod validation;

pub use error::ApiResult;
