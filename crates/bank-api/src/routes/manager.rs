//! Manager feature module: CRUD at `/api/manager` plus
//! `GET /api/manager/user`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use bank_core::Manager;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::resource::crud_router;
use crate::routing::{FeatureModule, LoadError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(current_manager))
        .merge(crud_router::<Manager>())
}

pub fn module() -> FeatureModule {
    FeatureModule::new(router())
}

pub async fn load() -> Result<FeatureModule, LoadError> {
    Ok(module())
}

/// GET /api/manager/user: the manager whose user login is the caller's.
#[utoipa::path(
    get,
    path = "/api/manager/user",
    responses(
        (status = 200, description = "Manager of the current user", body = Manager),
        (status = 404, description = "No manager for the current user", body = crate::error::ErrorBody),
    ),
    tag = "manager"
)]
pub(crate) async fn current_manager(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<Manager>, AppError> {
    tracing::debug!("REST request to get the current manager");
    state
        .managers
        .find_by(|manager| manager.user.login == caller.login)
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("manager for user {}", caller.login)))
}
