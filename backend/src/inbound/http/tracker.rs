//! The tracker route.
//!
//! ```text
//! GET  /   -> {"loggedIn": true, "financialRecords": [...]}
//! POST /   _action=create&income=1000&percentage=20&name=Emergency+Fund
//! ```
//!
//! Reads return JSON. Writes are form posts that redirect back to `/` with
//! `303 See Other`, so a browser form lands on a fresh read.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::ports::{CreateRecordRequest, DeleteRecordRequest, UpdateRecordRequest};
use crate::domain::{
    AccountRegistration, Error, FinancialRecord, LoginCredentials, RecordDraft, RecordId, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actions::{ActionForm, TrackerAction, UpdateCommand};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One record as rendered to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "6f1c0a8e-0d7a-4c43-9a4b-4f7f3a8b2c11")]
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1000)]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 20)]
    pub percentage: Decimal,
    #[schema(example = "Emergency Fund")]
    pub name: String,
    /// `income * percentage / 100`, derived on every read.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 200)]
    pub transfer_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&FinancialRecord> for RecordView {
    fn from(record: &FinancialRecord) -> Self {
        Self {
            id: record.id().to_string(),
            income: record.income().value(),
            percentage: record.percentage().value(),
            name: record.name().as_ref().to_owned(),
            transfer_amount: record.transfer_amount(),
            created_at: record.created_at(),
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackerView {
    pub logged_in: bool,
    pub financial_records: Vec<RecordView>,
}

impl TrackerView {
    fn anonymous() -> Self {
        Self {
            logged_in: false,
            financial_records: Vec::new(),
        }
    }
}

/// Form extractor settings for `POST /`.
///
/// Undecodable bodies surface as `invalid_request` in the usual error shape
/// rather than actix's plain-text default.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid form body: {err}")).into()
    })
}

/// Current user's records with their transfer amounts.
///
/// Anonymous callers, and sessions whose account no longer exists, get
/// `loggedIn: false` and an empty list, never an error.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Session state and the caller's records", body = TrackerView),
        (status = 503, description = "Record store unavailable", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["tracker"],
    operation_id = "showTracker"
)]
#[get("/")]
pub async fn show_tracker(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TrackerView>> {
    let Some(user_id) = signed_in_user(&state, &session).await? else {
        return Ok(web::Json(TrackerView::anonymous()));
    };
    let records = state.records_query.list_records(&user_id).await?;
    Ok(web::Json(TrackerView {
        logged_in: true,
        financial_records: records.iter().map(RecordView::from).collect(),
    }))
}

/// Perform the action named by `_action`, then redirect to `/`.
#[utoipa::path(
    post,
    path = "/",
    request_body(content = ActionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Action applied", headers(
            ("Location" = String, description = "Always `/`"),
            ("Set-Cookie" = String, description = "Updated session cookie")
        )),
        (status = 400, description = "Invalid or unknown action", body = ErrorBody),
        (status = 401, description = "Invalid credentials or login required", body = ErrorBody),
        (status = 404, description = "Record not found for this user", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["tracker"],
    operation_id = "submitAction"
)]
#[post("/")]
pub async fn submit_action(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ActionForm>,
) -> ApiResult<HttpResponse> {
    let action = TrackerAction::try_from(form.into_inner())?;
    dispatch(&state, &session, action).await?;
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

async fn dispatch(
    state: &HttpState,
    session: &SessionContext,
    action: TrackerAction,
) -> ApiResult<()> {
    match action {
        TrackerAction::Login(credentials) => login(state, session, &credentials).await,
        TrackerAction::CreateAccount(registration) => {
            create_account(state, session, &registration).await
        }
        TrackerAction::Logout => {
            logout(session);
            Ok(())
        }
        TrackerAction::Create(draft) => create_record(state, session, draft).await,
        TrackerAction::Update(command) => update_record(state, session, command).await,
        TrackerAction::Delete(record_id) => delete_record(state, session, record_id).await,
    }
}

/// Check that the session's user still has an account.
///
/// A cookie naming an account the store no longer holds is cleared so the
/// client falls back to anonymous.
async fn account_still_exists(
    state: &HttpState,
    session: &SessionContext,
    user_id: &UserId,
) -> ApiResult<bool> {
    if state.login.account_exists(user_id).await? {
        return Ok(true);
    }
    warn!(user_id = %user_id, "session names an unknown account; clearing it");
    session.clear_user();
    Ok(false)
}

async fn signed_in_user(state: &HttpState, session: &SessionContext) -> ApiResult<Option<UserId>> {
    let Some(user_id) = session.user_id() else {
        return Ok(None);
    };
    let exists = account_still_exists(state, session, &user_id).await?;
    Ok(exists.then_some(user_id))
}

async fn require_account(state: &HttpState, session: &SessionContext) -> ApiResult<UserId> {
    let user_id = session.require_user_id()?;
    if account_still_exists(state, session, &user_id).await? {
        Ok(user_id)
    } else {
        Err(Error::unauthorized("login required"))
    }
}

async fn login(
    state: &HttpState,
    session: &SessionContext,
    credentials: &LoginCredentials,
) -> ApiResult<()> {
    let user_id = state.login.authenticate(credentials).await?;
    session.persist_user(&user_id)
}

async fn create_account(
    state: &HttpState,
    session: &SessionContext,
    registration: &AccountRegistration,
) -> ApiResult<()> {
    let user_id = state.login.register(registration).await?;
    session.persist_user(&user_id)
}

fn logout(session: &SessionContext) {
    if let Some(user_id) = session.user_id() {
        info!(user_id = %user_id, "user logged out");
    }
    session.clear_user();
}

async fn create_record(
    state: &HttpState,
    session: &SessionContext,
    draft: RecordDraft,
) -> ApiResult<()> {
    let owner = require_account(state, session).await?;
    state
        .records
        .create_record(CreateRecordRequest { owner, draft })
        .await
        .map(drop)
}

async fn update_record(
    state: &HttpState,
    session: &SessionContext,
    command: UpdateCommand,
) -> ApiResult<()> {
    let owner = require_account(state, session).await?;
    let UpdateCommand { record_id, draft } = command;
    state
        .records
        .update_record(UpdateRecordRequest {
            owner,
            record_id,
            draft,
        })
        .await
}

async fn delete_record(
    state: &HttpState,
    session: &SessionContext,
    record_id: RecordId,
) -> ApiResult<()> {
    let owner = require_account(state, session).await?;
    state
        .records
        .delete_record(DeleteRecordRequest { owner, record_id })
        .await
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
