//! Savings tracker backend.
//!
//! Hexagonal layout: [`domain`] holds entities, ports and use-case services;
//! [`inbound`] adapts HTTP to the driving ports; [`outbound`] implements the
//! driven ports with PostgreSQL, in-memory stores and Argon2.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[doc(hidden)]
pub mod test_support;

pub use doc::ApiDoc;
pub use middleware::Trace;
