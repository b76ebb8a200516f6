//! Route and session wiring for the tracker endpoint.
//!
//! The server binary and the integration tests both mount the tracker
//! through [`configure_tracker`], so cookie attributes and route order are
//! the same everywhere.

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration;
use actix_web::web;

use super::session_config::SessionSettings;
use super::tracker::{form_config, show_tracker, submit_action};

/// Name of the encrypted session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";
/// Lifetime of the session cookie, refreshed whenever the session changes.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Cookie-backed session middleware with the tracker's cookie attributes.
#[must_use]
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.into())
        .cookie_path("/".into())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::days(SESSION_TTL_DAYS)),
        )
        .build()
}

/// Mount `GET /` and `POST /` behind the session middleware.
///
/// The empty-prefix scope matches every path, so call this after all other
/// services have been registered.
pub fn configure_tracker(cfg: &mut web::ServiceConfig, settings: &SessionSettings) {
    cfg.service(
        web::scope("")
            .wrap(session_middleware(settings))
            .app_data(form_config())
            .service(show_tracker)
            .service(submit_action),
    );
}
