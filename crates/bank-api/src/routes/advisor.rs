//! # Advisor Feature Module
//!
//! CRUD at `/api/advisor` plus `GET /api/advisor/user`, which returns the
//! advisor record owned by the authenticated caller.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use bank_core::Advisor;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::resource::crud_router;
use crate::routing::{FeatureModule, LoadError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(current_advisor))
        .merge(crud_router::<Advisor>())
}

pub fn module() -> FeatureModule {
    FeatureModule::new(router())
}

pub async fn load() -> Result<FeatureModule, LoadError> {
    Ok(module())
}

/// GET /api/advisor/user: the advisor whose user login is the caller's.
#[utoipa::path(
    get,
    path = "/api/advisor/user",
    responses(
        (status = 200, description = "Advisor of the current user", body = Advisor),
        (status = 404, description = "No advisor for the current user", body = crate::error::ErrorBody),
    ),
    tag = "advisor"
)]
pub(crate) async fn current_advisor(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<Advisor>, AppError> {
    tracing::debug!("REST request to get the current advisor");
    state
        .advisors
        .find_by(|advisor| advisor.user.login == caller.login)
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("advisor for user {}", caller.login)))
}
