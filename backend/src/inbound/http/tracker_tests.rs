//! Tests for the tracker handlers against mocked ports.

use super::*;
use crate::domain::ports::{MockFinancialRecordCommand, MockFinancialRecordQuery, MockLoginService};
use crate::domain::{FinancialRecord, RecordName, UserId};
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
use crate::test_support::fixture_timestamp;
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::Value;
use std::sync::Arc;

const ALICE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const RECORD: &str = "6f1c0a8e-0d7a-4c43-9a4b-4f7f3a8b2c11";

fn alice() -> UserId {
    UserId::new(ALICE).expect("fixture user id")
}

fn emergency_fund() -> FinancialRecord {
    FinancialRecord::create(
        RecordId::new(RECORD).expect("fixture record id"),
        alice(),
        RecordDraft {
            income: "1000".parse().expect("income"),
            percentage: "20".parse().expect("percentage"),
            name: RecordName::new("Emergency Fund").expect("name"),
        },
        fixture_timestamp(),
    )
}

struct Ports {
    login: MockLoginService,
    records: MockFinancialRecordCommand,
    records_query: MockFinancialRecordQuery,
}

/// Ports where "pw1" signs in as alice; `alice_exists` controls whether her
/// account is still in the store afterwards.
fn ports_with_account(alice_exists: bool) -> Ports {
    let mut login = MockLoginService::new();
    login
        .expect_authenticate()
        .returning(|credentials| match credentials.password() {
            "pw1" => Ok(alice()),
            _ => Err(Error::unauthorized("invalid credentials")),
        });
    login
        .expect_account_exists()
        .returning(move |id| Ok(alice_exists && *id == alice()));
    Ports {
        login,
        records: MockFinancialRecordCommand::new(),
        records_query: MockFinancialRecordQuery::new(),
    }
}

#[fixture]
fn ports() -> Ports {
    ports_with_account(true)
}

fn test_app(
    ports: Ports,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(ports.login),
        Arc::new(ports.records),
        Arc::new(ports.records_query),
    );
    App::new()
        .app_data(web::Data::new(state))
        .app_data(form_config())
        .wrap(test_session_middleware())
        .service(show_tracker)
        .service(submit_action)
}

fn post(form: &[(&str, &str)], cookie: Option<Cookie<'static>>) -> actix_test::TestRequest {
    let request = actix_test::TestRequest::post().uri("/").set_form(form);
    match cookie {
        Some(cookie) => request.cookie(cookie),
        None => request,
    }
}

fn login_form() -> [(&'static str, &'static str); 3] {
    [
        ("_action", "login"),
        ("email", "alice@example.com"),
        ("password", "pw1"),
    ]
}

async fn error_body(response: actix_web::dev::ServiceResponse) -> Value {
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("error body json")
}

#[rstest]
#[actix_web::test]
async fn anonymous_read_is_logged_out_and_empty(mut ports: Ports) {
    ports.records_query.expect_list_records().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let view: TrackerView = actix_test::read_body_json(response).await;
    assert_eq!(view, TrackerView::anonymous());
}

#[rstest]
#[actix_web::test]
async fn login_redirects_and_read_lists_records_with_transfer_amount(mut ports: Ports) {
    ports
        .records_query
        .expect_list_records()
        .withf(|owner| owner == &alice())
        .times(1)
        .returning(|_| Ok(vec![emergency_fund()]));
    let app = actix_test::init_service(test_app(ports)).await;

    let login = actix_test::call_service(&app, post(&login_form(), None).to_request()).await;
    assert_eq!(login.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        login
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
    let cookie = session_cookie(&login).expect("session cookie after login");

    let read = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(read).await;

    assert_eq!(body["loggedIn"], true);
    let record = &body["financialRecords"][0];
    assert_eq!(record["_id"], RECORD);
    assert_eq!(record["name"], "Emergency Fund");
    assert_eq!(record["income"].as_f64(), Some(1000.0));
    assert_eq!(record["percentage"].as_f64(), Some(20.0));
    assert_eq!(record["transferAmount"].as_f64(), Some(200.0));
    assert_eq!(record["createdAt"], "2026-01-02T03:04:05Z");
}

#[rstest]
#[actix_web::test]
async fn wrong_password_is_unauthorised_without_cookie(ports: Ports) {
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        post(
            &[
                ("_action", "login"),
                ("email", "alice@example.com"),
                ("password", "wrong"),
            ],
            None,
        )
        .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    let body = error_body(response).await;
    assert_eq!(body["error"], "invalid credentials");
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn create_account_conflict_is_reported(mut ports: Ports) {
    ports
        .login
        .expect_register()
        .times(1)
        .returning(|_| Err(Error::conflict("email already in use")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        post(
            &[
                ("_action", "createAccount"),
                ("email", "alice@example.com"),
                ("password", "pw1"),
                ("firstName", "Alice"),
                ("lastName", "A"),
            ],
            None,
        )
        .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(session_cookie(&response).is_none());
}

#[rstest]
#[case(&[("_action", "create"), ("income", "1000"), ("percentage", "20"), ("name", "Fund")])]
#[case(&[("_action", "update"), ("recordId", RECORD), ("income", "1"), ("percentage", "1"), ("name", "x")])]
#[case(&[("_action", "delete"), ("recordId", RECORD)])]
#[actix_web::test]
async fn record_actions_require_login(mut ports: Ports, #[case] form: &[(&str, &str)]) {
    ports.records.expect_create_record().never();
    ports.records.expect_update_record().never();
    ports.records.expect_delete_record().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(&app, post(form, None).to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_body(response).await["error"], "login required");
}

#[rstest]
#[actix_web::test]
async fn create_passes_owner_and_draft_to_the_port(mut ports: Ports) {
    ports
        .records
        .expect_create_record()
        .withf(|request| {
            request.owner == alice()
                && request.draft.name.as_ref() == "Emergency Fund"
                && request.draft.income.value() == Decimal::from(1000)
        })
        .times(1)
        .returning(|_| Ok(RecordId::random()));
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, post(&login_form(), None).to_request()).await;
    let cookie = session_cookie(&login).expect("session cookie");

    let response = actix_test::call_service(
        &app,
        post(
            &[
                ("_action", "create"),
                ("income", "1000"),
                ("percentage", "20"),
                ("name", "Emergency Fund"),
            ],
            Some(cookie),
        )
        .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_record_is_not_found(mut ports: Ports) {
    ports
        .records
        .expect_update_record()
        .times(1)
        .returning(|request| {
            Err(Error::not_found(format!(
                "financial record {} not found",
                request.record_id
            )))
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, post(&login_form(), None).to_request()).await;
    let cookie = session_cookie(&login).expect("session cookie");

    let response = actix_test::call_service(
        &app,
        post(
            &[
                ("_action", "update"),
                ("recordId", RECORD),
                ("income", "10"),
                ("percentage", "5"),
                ("name", "Other"),
            ],
            Some(cookie),
        )
        .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_body(response).await["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn logout_clears_the_session(mut ports: Ports) {
    ports.records_query.expect_list_records().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, post(&login_form(), None).to_request()).await;
    let cookie = session_cookie(&login).expect("session cookie");

    let logout =
        actix_test::call_service(&app, post(&[("_action", "logout")], Some(cookie)).to_request())
            .await;
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);
    let after = session_cookie(&logout).expect("cookie after logout");

    let read = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/")
            .cookie(after)
            .to_request(),
    )
    .await;
    let view: TrackerView = actix_test::read_body_json(read).await;
    assert_eq!(view, TrackerView::anonymous());
}

#[rstest]
#[case(&[("_action", "transfer")], "_action")]
#[case(&[("email", "alice@example.com")], "_action")]
#[case(&[("_action", "login"), ("email", "alice@example.com")], "password")]
#[actix_web::test]
async fn malformed_forms_are_invalid_requests(
    ports: Ports,
    #[case] form: &[(&str, &str)],
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(&app, post(form, None).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn store_outage_on_read_is_service_unavailable(mut ports: Ports) {
    ports
        .records_query
        .expect_list_records()
        .returning(|_| Err(Error::service_unavailable("record store unavailable")));
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, post(&login_form(), None).to_request()).await;
    let cookie = session_cookie(&login).expect("session cookie");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
#[case(&[("_action", "create"), ("income", "1000"), ("percentage", "20"), ("name", "Fund")])]
#[case(&[("_action", "delete"), ("recordId", RECORD)])]
#[actix_web::test]
async fn record_actions_for_a_vanished_account_are_unauthorised(#[case] form: &[(&str, &str)]) {
    let mut ports = ports_with_account(false);
    ports.records.expect_create_record().never();
    ports.records.expect_delete_record().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, post(&login_form(), None).to_request()).await;
    let cookie = session_cookie(&login).expect("session cookie");

    let response = actix_test::call_service(&app, post(form, Some(cookie)).to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let cleared = session_cookie(&response).expect("stale session is rewritten");
    let read = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    let view: TrackerView = actix_test::read_body_json(read).await;
    assert_eq!(view, TrackerView::anonymous());
}

#[rstest]
#[actix_web::test]
async fn read_for_a_vanished_account_is_anonymous() {
    let mut ports = ports_with_account(false);
    ports.records_query.expect_list_records().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, post(&login_form(), None).to_request()).await;
    let cookie = session_cookie(&login).expect("session cookie");

    let read = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(read.status(), StatusCode::OK);
    let view: TrackerView = actix_test::read_body_json(read).await;
    assert_eq!(view, TrackerView::anonymous());
}
