//! Form parsing for `POST /`.
//!
//! The raw form is a flat bag of optional strings. [`TrackerAction`] turns it
//! into one typed command per `_action` value without touching actix, so the
//! parsing rules are testable on their own.
//!
//! ```text
//! _action=login&email=alice@example.com&password=pw1
//! _action=create&income=1000&percentage=20&name=Emergency+Fund
//! _action=delete&recordId=6f1c0a8e-...
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AccountRegistration, Error, LoginCredentials, PersonName, RecordDraft, RecordId, RecordName,
};

use super::validation::{
    ACTION, EMAIL, FIRST_NAME, FieldName, INCOME, LAST_NAME, NAME, PASSWORD, PERCENTAGE,
    RECORD_ID, missing_field_error, record_field_error, unknown_action_error, user_field_error,
};

/// Form body accepted by `POST /`.
///
/// Which fields are required depends on `_action`; unused fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ActionForm {
    /// One of `login`, `createAccount`, `logout`, `create`, `update`, `delete`.
    #[serde(rename = "_action")]
    #[schema(example = "create")]
    pub action: Option<String>,
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "recordId")]
    pub record_id: Option<String>,
    /// Decimal, at most two places.
    #[schema(example = "1000")]
    pub income: Option<String>,
    /// Percentage points between 0 and 100.
    #[schema(example = "20")]
    pub percentage: Option<String>,
    #[schema(example = "Emergency Fund")]
    pub name: Option<String>,
}

/// Typed command for `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommand {
    pub record_id: RecordId,
    pub draft: RecordDraft,
}

/// A validated `POST /` submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerAction {
    Login(LoginCredentials),
    CreateAccount(AccountRegistration),
    Logout,
    Create(RecordDraft),
    Update(UpdateCommand),
    Delete(RecordId),
}

impl TryFrom<ActionForm> for TrackerAction {
    type Error = Error;

    fn try_from(form: ActionForm) -> Result<Self, Self::Error> {
        let action = required(ACTION, form.action.as_deref())?;
        match action {
            "login" => login(&form).map(Self::Login),
            "createAccount" => create_account(&form).map(Self::CreateAccount),
            "logout" => Ok(Self::Logout),
            "create" => record_draft(&form).map(Self::Create),
            "update" => {
                let record_id = record_id(&form)?;
                let draft = record_draft(&form)?;
                Ok(Self::Update(UpdateCommand { record_id, draft }))
            }
            "delete" => record_id(&form).map(Self::Delete),
            other => Err(unknown_action_error(other)),
        }
    }
}

/// Present and not blank, else a `missing_field` error.
fn required(field: FieldName, value: Option<&str>) -> Result<&str, Error> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw),
        _ => Err(missing_field_error(field)),
    }
}

fn login(form: &ActionForm) -> Result<LoginCredentials, Error> {
    let email = required(EMAIL, form.email.as_deref())?;
    let password = required(PASSWORD, form.password.as_deref())?;
    LoginCredentials::try_from_parts(email, password).map_err(|err| user_field_error(EMAIL, &err))
}

fn create_account(form: &ActionForm) -> Result<AccountRegistration, Error> {
    let credentials = login(form)?;
    let first = required(FIRST_NAME, form.first_name.as_deref())?;
    let last = required(LAST_NAME, form.last_name.as_deref())?;
    let first_name = PersonName::new(first).map_err(|err| user_field_error(FIRST_NAME, &err))?;
    let last_name = PersonName::new(last).map_err(|err| user_field_error(LAST_NAME, &err))?;
    Ok(AccountRegistration::new(credentials, first_name, last_name))
}

fn record_id(form: &ActionForm) -> Result<RecordId, Error> {
    let raw = required(RECORD_ID, form.record_id.as_deref())?;
    RecordId::new(raw.trim()).map_err(|err| record_field_error(&err))
}

fn record_draft(form: &ActionForm) -> Result<RecordDraft, Error> {
    let income = required(INCOME, form.income.as_deref())?
        .parse()
        .map_err(|err| record_field_error(&err))?;
    let percentage = required(PERCENTAGE, form.percentage.as_deref())?
        .parse()
        .map_err(|err| record_field_error(&err))?;
    let name = RecordName::new(required(NAME, form.name.as_deref())?)
        .map_err(|err| record_field_error(&err))?;
    Ok(RecordDraft {
        income,
        percentage,
        name,
    })
}
