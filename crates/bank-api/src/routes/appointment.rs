//! # Appointment Feature Module
//!
//! CRUD at `/api/appointment` plus lookups of the appointments linked to
//! one advisor or one manager:
//!
//! - `GET /api/appointment/advisor/{advisorId}`
//! - `GET /api/appointment/manager/{managerId}`

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use bank_core::{AdvisorId, Appointment, ManagerId};

use crate::error::AppError;
use crate::extractors::extract_path;
use crate::resource::crud_router;
use crate::routing::{FeatureModule, LoadError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/advisor/{advisor_id}", get(appointments_by_advisor))
        .route("/manager/{manager_id}", get(appointments_by_manager))
        .merge(crud_router::<Appointment>())
}

pub fn module() -> FeatureModule {
    FeatureModule::new(router())
}

pub async fn load() -> Result<FeatureModule, LoadError> {
    Ok(module())
}

#[utoipa::path(
    get,
    path = "/api/appointment/advisor/{advisor_id}",
    params(("advisor_id" = i64, Path, description = "Advisor identifier")),
    responses(
        (status = 200, description = "Appointments linked to the advisor", body = Vec<Appointment>),
    ),
    tag = "appointment"
)]
pub(crate) async fn appointments_by_advisor(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let advisor_id = AdvisorId(extract_path(path)?);
    tracing::debug!("REST request to get appointments of advisor : {}", advisor_id);
    Ok(Json(
        state
            .appointments
            .find_by(|a| a.advisor_id() == Some(advisor_id)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/appointment/manager/{manager_id}",
    params(("manager_id" = i64, Path, description = "Manager identifier")),
    responses(
        (status = 200, description = "Appointments linked to the manager", body = Vec<Appointment>),
    ),
    tag = "appointment"
)]
pub(crate) async fn appointments_by_manager(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let manager_id = ManagerId(extract_path(path)?);
    tracing::debug!("REST request to get appointments of manager : {}", manager_id);
    Ok(Json(
        state
            .appointments
            .find_by(|a| a.manager_id() == Some(manager_id)),
    ))
}
