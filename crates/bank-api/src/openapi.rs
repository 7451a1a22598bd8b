//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes and entity schemas into one
//! OpenAPI document served at `/api/openapi.json`. The generic CRUD
//! handlers are shared by every entity and are described by the schemas
//! rather than per-route annotations.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Adds the Bearer token security scheme to the OpenAPI document.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some(
                            "Bearer token from the accounts file (BANK_ACCOUNTS_FILE).",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bank Advice API",
        version = "0.1.0",
        description = "Entity management for the bank advice application: agencies, enterprises, advisors, managers and appointments.\n\nEach entity is served under `/api/<segment>` by a feature module loaded on first use.\n\nAuthentication: Bearer token via `Authorization: Bearer <token>` when accounts are configured. Health probes (`/health/*`) and `/metrics` are unauthenticated.",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    paths(
        crate::routes::navigation::list_entity_routes,
        crate::routes::advisor::current_advisor,
        crate::routes::manager::current_manager,
        crate::routes::appointment::appointments_by_advisor,
        crate::routes::appointment::appointments_by_manager,
    ),
    components(schemas(
        bank_core::Agency,
        bank_core::Enterprise,
        bank_core::Advisor,
        bank_core::Manager,
        bank_core::Appointment,
        bank_core::User,
        bank_core::Gender,
        bank_core::AdvisorId,
        bank_core::AgencyId,
        bank_core::AppointmentId,
        bank_core::EnterpriseId,
        bank_core::ManagerId,
        bank_core::UserId,
        crate::routes::navigation::EntityRouteSummary,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "navigation", description = "Entity route table"),
        (name = "advisor", description = "Advisors"),
        (name = "manager", description = "Managers"),
        (name = "appointment", description = "Appointments"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
