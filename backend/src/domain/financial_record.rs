//! Financial records ("savings tactics") and the derived transfer amount.
//!
//! A record pairs an income with the percentage of it the owner intends to
//! move into savings. The transfer amount is never stored; every read derives
//! it from the current income and percentage via [`transfer_amount`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::UserId;

/// Maximum accepted length for a record name, counted in characters.
pub const RECORD_NAME_MAX: usize = 120;
/// Decimal places retained for incomes.
pub const INCOME_SCALE: u32 = 2;
/// Decimal places retained for percentages.
pub const PERCENTAGE_SCALE: u32 = 4;

/// Exclusive upper bound on incomes; matches the `numeric(14,2)` column.
fn income_limit() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// Validation errors raised by financial record constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordValidationError {
    #[error("record id must be a valid UUID")]
    InvalidId,
    #[error("income must be a decimal number")]
    IncomeNotNumeric,
    #[error("income must not be negative")]
    NegativeIncome,
    #[error("income must be below 1000000000000")]
    IncomeTooLarge,
    #[error("income must have at most {max} decimal places")]
    IncomeTooPrecise { max: u32 },
    #[error("percentage must be a decimal number")]
    PercentageNotNumeric,
    #[error("percentage must be between 0 and 100")]
    PercentageOutOfRange,
    #[error("percentage must have at most {max} decimal places")]
    PercentageTooPrecise { max: u32 },
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Stable financial record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Parse a record identifier from its textual UUID form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecordValidationError> {
        Uuid::parse_str(raw.as_ref().trim())
            .map(Self)
            .map_err(|_| RecordValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative income amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Income(Decimal);

impl Income {
    /// Validate an income amount.
    pub fn new(value: Decimal) -> Result<Self, RecordValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(RecordValidationError::NegativeIncome);
        }
        if value >= income_limit() {
            return Err(RecordValidationError::IncomeTooLarge);
        }
        let normalized = value.normalize();
        if normalized.scale() > INCOME_SCALE {
            return Err(RecordValidationError::IncomeTooPrecise { max: INCOME_SCALE });
        }
        Ok(Self(normalized.abs()))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Income {
    type Err = RecordValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s).ok_or(RecordValidationError::IncomeNotNumeric)?;
        Self::new(value)
    }
}

/// Share of the income to save, in percentage points (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsPercentage(Decimal);

impl SavingsPercentage {
    /// Validate a percentage expressed in points.
    pub fn new(value: Decimal) -> Result<Self, RecordValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(RecordValidationError::PercentageOutOfRange);
        }
        if value > Decimal::ONE_HUNDRED {
            return Err(RecordValidationError::PercentageOutOfRange);
        }
        let normalized = value.normalize();
        if normalized.scale() > PERCENTAGE_SCALE {
            return Err(RecordValidationError::PercentageTooPrecise {
                max: PERCENTAGE_SCALE,
            });
        }
        Ok(Self(normalized.abs()))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for SavingsPercentage {
    type Err = RecordValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s).ok_or(RecordValidationError::PercentageNotNumeric)?;
        Self::new(value)
    }
}

/// Parse a plain decimal literal such as `1000`, `12.5` or `-3`.
///
/// Blank input, trailing text and digit separators (`1_000`) are rejected.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let plain = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'));
    if trimmed.is_empty() || !plain {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// Display name for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordName(String);

impl RecordName {
    /// Validate a record name; surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecordValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        if trimmed.chars().count() > RECORD_NAME_MAX {
            return Err(RecordValidationError::NameTooLong {
                max: RECORD_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Derive the amount to move into savings.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use savings_tracker::domain::{Income, SavingsPercentage, transfer_amount};
///
/// let income = Income::new(Decimal::new(1000, 0)).unwrap();
/// let percentage = SavingsPercentage::new(Decimal::new(20, 0)).unwrap();
/// assert_eq!(transfer_amount(income, percentage), Decimal::new(200, 0));
/// ```
pub fn transfer_amount(income: Income, percentage: SavingsPercentage) -> Decimal {
    // Bounded inputs keep the product far below Decimal::MAX.
    (income.value() * percentage.value() / Decimal::ONE_HUNDRED).normalize()
}

/// Validated user-editable fields of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub income: Income,
    pub percentage: SavingsPercentage,
    pub name: RecordName,
}

/// Complete set of stored fields, used when rehydrating from a store.
#[derive(Debug, Clone)]
pub struct FinancialRecordParts {
    pub id: RecordId,
    pub owner: UserId,
    pub draft: RecordDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A savings tactic owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialRecord {
    id: RecordId,
    owner: UserId,
    income: Income,
    percentage: SavingsPercentage,
    name: RecordName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FinancialRecord {
    /// Create a brand new record stamped at `now`.
    pub fn create(id: RecordId, owner: UserId, draft: RecordDraft, now: DateTime<Utc>) -> Self {
        Self::from_parts(FinancialRecordParts {
            id,
            owner,
            draft,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn from_parts(parts: FinancialRecordParts) -> Self {
        let FinancialRecordParts {
            id,
            owner,
            draft: RecordDraft {
                income,
                percentage,
                name,
            },
            created_at,
            updated_at,
        } = parts;
        Self {
            id,
            owner,
            income,
            percentage,
            name,
            created_at,
            updated_at,
        }
    }

    /// Replace the editable fields, keeping identity, owner and creation time.
    #[must_use]
    pub fn revise(self, draft: RecordDraft, now: DateTime<Utc>) -> Self {
        Self {
            income: draft.income,
            percentage: draft.percentage,
            name: draft.name,
            updated_at: now,
            ..self
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn income(&self) -> Income {
        self.income
    }

    pub fn percentage(&self) -> SavingsPercentage {
        self.percentage
    }

    pub fn name(&self) -> &RecordName {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Amount to move into savings, derived from the current fields.
    pub fn transfer_amount(&self) -> Decimal {
        transfer_amount(self.income, self.percentage)
    }

    /// True when `user` owns this record.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).expect("decimal literal")
    }

    #[fixture]
    fn draft() -> RecordDraft {
        RecordDraft {
            income: "1000".parse().expect("income"),
            percentage: "20".parse().expect("percentage"),
            name: RecordName::new("Emergency Fund").expect("name"),
        }
    }

    #[rstest]
    #[case("1000", "20", "200")]
    #[case("0", "50", "0")]
    #[case("1234.56", "12.5", "154.32")]
    #[case("100", "0.0001", "0.0001")]
    #[case("999999999999.99", "100", "999999999999.99")]
    #[case("3", "33.3333", "0.999999")]
    fn transfer_amount_is_exact(#[case] income: &str, #[case] percentage: &str, #[case] expected: &str) {
        let income: Income = income.parse().expect("income");
        let percentage: SavingsPercentage = percentage.parse().expect("percentage");
        assert_eq!(transfer_amount(income, percentage), dec(expected));
    }

    #[rstest]
    #[case("", RecordValidationError::IncomeNotNumeric)]
    #[case("abc", RecordValidationError::IncomeNotNumeric)]
    #[case("-1", RecordValidationError::NegativeIncome)]
    #[case("1000000000000", RecordValidationError::IncomeTooLarge)]
    #[case("1.001", RecordValidationError::IncomeTooPrecise { max: INCOME_SCALE })]
    #[case("1_000", RecordValidationError::IncomeNotNumeric)]
    #[case("1 000", RecordValidationError::IncomeNotNumeric)]
    fn income_rejects_invalid_input(#[case] raw: &str, #[case] expected: RecordValidationError) {
        assert_eq!(raw.parse::<Income>().expect_err("invalid income"), expected);
    }

    #[rstest]
    #[case(" 1000 ", "1000")]
    #[case("12.50", "12.5")]
    #[case("-0", "0")]
    fn income_accepts_plain_decimals(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(raw.parse::<Income>().expect("valid income").value(), dec(expected));
    }

    #[rstest]
    #[case("x", RecordValidationError::PercentageNotNumeric)]
    #[case("-0.5", RecordValidationError::PercentageOutOfRange)]
    #[case("100.01", RecordValidationError::PercentageOutOfRange)]
    #[case("0.00001", RecordValidationError::PercentageTooPrecise { max: PERCENTAGE_SCALE })]
    fn percentage_rejects_invalid_input(#[case] raw: &str, #[case] expected: RecordValidationError) {
        assert_eq!(
            raw.parse::<SavingsPercentage>().expect_err("invalid percentage"),
            expected
        );
    }

    #[rstest]
    #[case("0")]
    #[case("100")]
    #[case("20.25")]
    fn percentage_accepts_bounds(#[case] raw: &str) {
        assert!(raw.parse::<SavingsPercentage>().is_ok());
    }

    #[rstest]
    fn record_name_limits() {
        assert_eq!(RecordName::new("  ").expect_err("blank"), RecordValidationError::EmptyName);
        assert!(RecordName::new("x".repeat(RECORD_NAME_MAX)).is_ok());
        assert_eq!(
            RecordName::new("x".repeat(RECORD_NAME_MAX + 1)).expect_err("too long"),
            RecordValidationError::NameTooLong { max: RECORD_NAME_MAX }
        );
    }

    #[rstest]
    fn record_id_parses_uuid() {
        assert_eq!(RecordId::new("nope").expect_err("invalid"), RecordValidationError::InvalidId);
        let id = RecordId::random();
        assert_eq!(RecordId::new(id.to_string()).expect("round trip"), id);
    }

    #[rstest]
    fn revise_keeps_identity_and_creation_time(draft: RecordDraft) {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("timestamp");
        let later = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single().expect("timestamp");
        let owner = UserId::random();
        let record = FinancialRecord::create(RecordId::random(), owner.clone(), draft, created);
        let id = record.id();

        let revised = record.revise(
            RecordDraft {
                income: "2000".parse().expect("income"),
                percentage: "10".parse().expect("percentage"),
                name: RecordName::new("Holiday").expect("name"),
            },
            later,
        );

        assert_eq!(revised.id(), id);
        assert!(revised.is_owned_by(&owner));
        assert_eq!(revised.created_at(), created);
        assert_eq!(revised.updated_at(), later);
        assert_eq!(revised.transfer_amount(), dec("200"));
        assert_eq!(revised.name().as_ref(), "Holiday");
    }
}
