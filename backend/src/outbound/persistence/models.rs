//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{financial_records, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Financial record models
// ---------------------------------------------------------------------------

/// Row struct for reading from the financial_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = financial_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FinancialRecordRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub income: Decimal,
    pub percentage: Decimal,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new financial records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = financial_records)]
pub(crate) struct NewFinancialRecordRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub income: Decimal,
    pub percentage: Decimal,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a record is revised.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = financial_records)]
pub(crate) struct FinancialRecordUpdate<'a> {
    pub income: Decimal,
    pub percentage: Decimal,
    pub name: &'a str,
    pub updated_at: DateTime<Utc>,
}
