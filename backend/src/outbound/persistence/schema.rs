//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered account holders.
    ///
    /// `email` carries the `users_email_key` unique constraint.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login email, unique and case-sensitive.
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        first_name -> Varchar,
        last_name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Savings tactics owned by a single user.
    ///
    /// Rows cascade away with their owner. The transfer amount is derived at
    /// read time and has no column.
    financial_records (id) {
        id -> Uuid,
        /// Owning user; FK to `users.id`.
        user_id -> Uuid,
        /// `numeric(14,2)`, never negative.
        income -> Numeric,
        /// `numeric(7,4)` percentage points in `[0, 100]`.
        percentage -> Numeric,
        /// Display name, at most 120 characters.
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(financial_records -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(financial_records, users);
