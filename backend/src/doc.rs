//! OpenAPI document for the tracker.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::actions::ActionForm;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::ErrorCodeSchema;
use crate::inbound::http::tracker::{RecordView, TrackerView};

/// Registers the session cookie as a security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by the login and createAccount actions.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Savings tracker API",
        description = "Session-authenticated tracking of savings tactics and health checks."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::tracker::show_tracker,
        crate::inbound::http::tracker::submit_action,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(TrackerView, RecordView, ActionForm, ErrorBody, ErrorCodeSchema)),
    tags(
        (name = "tracker", description = "Accounts, sessions and financial records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
